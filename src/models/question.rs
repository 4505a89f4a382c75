use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{Answer, AnswerId, AnswerResponse, UserId, VoteDirection};

pub type QuestionId = u64;

pub const MIN_TITLE_LEN: usize = 10;
pub const MIN_DESCRIPTION_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_id: UserId,
    pub votes: i32,
    pub views: u32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    pub fn has_accepted_answer(&self) -> bool {
        self.answers.iter().any(|a| a.is_accepted)
    }

    pub fn accepted_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_accepted)
    }

    pub fn answer(&self, answer_id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    pub fn answer_mut(&mut self, answer_id: AnswerId) -> Option<&mut Answer> {
        self.answers.iter_mut().find(|a| a.id == answer_id)
    }
}

// Sorting options for question lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSort {
    #[default]
    Newest,
    Votes,
    Answers,
    Views,
}

impl FromStr for QuestionSort {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" | "Newest" => Ok(QuestionSort::Newest),
            "votes" | "Votes" => Ok(QuestionSort::Votes),
            "answers" | "Answers" => Ok(QuestionSort::Answers),
            "views" | "Views" => Ok(QuestionSort::Views),
            _ => Err(format!("Unknown QuestionSort: {}", s)),
        }
    }
}

impl fmt::Display for QuestionSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionSort::Newest => "newest",
            QuestionSort::Votes => "votes",
            QuestionSort::Answers => "answers",
            QuestionSort::Views => "views",
        })
    }
}

// Filter options for question lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionFilter {
    #[default]
    All,
    Unanswered,
    Answered,
    Accepted,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Unanswered => question.answers.is_empty(),
            QuestionFilter::Answered => !question.answers.is_empty(),
            QuestionFilter::Accepted => question.has_accepted_answer(),
        }
    }
}

impl FromStr for QuestionFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "All" => Ok(QuestionFilter::All),
            "unanswered" | "Unanswered" => Ok(QuestionFilter::Unanswered),
            "answered" | "Answered" => Ok(QuestionFilter::Answered),
            "accepted" | "Accepted" => Ok(QuestionFilter::Accepted),
            _ => Err(format!("Unknown QuestionFilter: {}", s)),
        }
    }
}

impl fmt::Display for QuestionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionFilter::All => "all",
            QuestionFilter::Unanswered => "unanswered",
            QuestionFilter::Answered => "answered",
            QuestionFilter::Accepted => "accepted",
        })
    }
}

/// Ask-question form contents. Tags are expected to come from a
/// [`TagInput`](crate::models::TagInput), which applies the cap and normalization.
#[derive(Debug, Clone, Default, PartialEq, Validate, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
}

impl QuestionDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags,
        }
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(validation_error("required", "Title is required"));
    }
    if trimmed.chars().count() < MIN_TITLE_LEN {
        return Err(validation_error(
            "too_short",
            "Title must be at least 10 characters",
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(validation_error("required", "Description is required"));
    }
    if trimmed.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(validation_error(
            "too_short",
            "Description must be at least 20 characters",
        ));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.is_empty() {
        return Err(validation_error("required", "At least one tag is required"));
    }
    Ok(())
}

// Question list item (home and tag pages)
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub votes: i32,
    pub answer_count: usize,
    pub views: u32,
    pub tags: Vec<String>,
    pub has_accepted_answer: bool,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
}

// Question with its ordered answers (detail page)
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_id: UserId,
    pub votes: i32,
    pub views: u32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
    pub user_vote: Option<VoteDirection>,
    pub answer_count_label: String,
    pub answers: Vec<AnswerResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_is_the_only_error() {
        let draft = QuestionDraft::new(
            "short",
            "a description long enough to pass the twenty char minimum",
            vec!["tag1".to_string()],
        );
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("title"));
    }

    #[test]
    fn test_missing_tags_rejected() {
        let draft = QuestionDraft::new(
            "A sufficiently long title here",
            "A sufficiently long description body text",
            vec![],
        );
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("tags"));
    }

    #[test]
    fn test_lengths_measured_after_trimming() {
        let draft = QuestionDraft::new(
            "   padded    ",
            "      short body       ",
            vec!["rust".to_string()],
        );
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn test_valid_draft_passes() {
        let draft = QuestionDraft::new(
            "How do lifetimes work?",
            "I keep running into borrow checker errors with references.",
            vec!["rust".to_string()],
        );
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_filter_parsing_round_trips_display() {
        for filter in [
            QuestionFilter::All,
            QuestionFilter::Unanswered,
            QuestionFilter::Answered,
            QuestionFilter::Accepted,
        ] {
            assert_eq!(filter.to_string().parse::<QuestionFilter>(), Ok(filter));
        }
        assert!("popular".parse::<QuestionSort>().is_err());
    }
}
