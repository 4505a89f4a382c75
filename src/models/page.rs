use serde::Serialize;

use crate::{
    error::FieldErrors,
    models::{QuestionDraft, QuestionFilter, QuestionListResponse, QuestionResponse, QuestionSort},
};

/// A rendered destination.
#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Home(HomePage),
    Tag(TagPage),
    Ask(AskPage),
    Question(QuestionPage),
    Login(AuthPage),
    Signup(AuthPage),
    NotFound(NotFoundPage),
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub heading: String,
    pub count_label: String,
    pub sort: QuestionSort,
    pub filter: QuestionFilter,
    pub can_ask: bool,
    pub questions: Vec<QuestionListResponse>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TagPage {
    pub tag: String,
    pub count_label: String,
    pub can_ask: bool,
    pub questions: Vec<QuestionListResponse>,
    pub related_tags: Vec<String>,
    pub empty_message: Option<String>,
    pub back_link: String,
}

#[derive(Debug, Serialize)]
pub struct AskPage {
    pub signed_in: bool,
    pub draft: QuestionDraft,
    pub errors: FieldErrors,
    pub max_tags: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub question: QuestionResponse,
    pub can_accept: bool,
    pub can_answer: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthPage {
    pub signed_in_as: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotFoundPage {
    pub message: String,
    pub back_link: String,
}

impl NotFoundPage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            back_link: "/".to_string(),
        }
    }
}
