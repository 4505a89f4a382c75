use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    error::Result,
    models::{
        Answer, IgnoreReason, Outcome, Question, QuestionDraft, QuestionFilter, QuestionId,
        QuestionListResponse, QuestionSort, TagInput, User,
    },
    store::QuestionRepository,
    utils::format_time_ago,
};

/// Keeps the questions matching `filter`, preserving their order.
pub fn filter_questions(questions: Vec<Question>, filter: QuestionFilter) -> Vec<Question> {
    questions.into_iter().filter(|q| filter.matches(q)).collect()
}

/// Stable descending sort; equal keys keep their input order.
pub fn sort_questions(questions: &mut [Question], sort: QuestionSort) {
    match sort {
        QuestionSort::Newest => questions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        QuestionSort::Votes => questions.sort_by(|a, b| b.votes.cmp(&a.votes)),
        QuestionSort::Answers => questions.sort_by(|a, b| b.answer_count().cmp(&a.answer_count())),
        QuestionSort::Views => questions.sort_by(|a, b| b.views.cmp(&a.views)),
    }
}

pub fn filter_and_sort(
    questions: Vec<Question>,
    sort: QuestionSort,
    filter: QuestionFilter,
) -> Vec<Question> {
    let mut questions = filter_questions(questions, filter);
    sort_questions(&mut questions, sort);
    questions
}

/// Accepted answer first, the rest by votes descending (stable).
pub fn order_answers(answers: &mut [Answer]) {
    answers.sort_by(|a, b| {
        b.is_accepted
            .cmp(&a.is_accepted)
            .then_with(|| b.votes.cmp(&a.votes))
    });
}

pub fn get_questions(
    repo: &dyn QuestionRepository,
    sort: QuestionSort,
    filter: QuestionFilter,
) -> Result<Vec<Question>> {
    let questions = repo.load_questions()?;
    Ok(filter_and_sort(questions, sort, filter))
}

pub fn get_question_by_id(repo: &dyn QuestionRepository, id: QuestionId) -> Result<Option<Question>> {
    repo.get_question(id)
}

pub fn get_questions_by_tag(repo: &dyn QuestionRepository, tag: &str) -> Result<Vec<Question>> {
    repo.get_questions_by_tag(tag)
}

/// Tags that appear alongside `tag`, unique, in first-appearance order.
pub fn related_tags(questions: &[Question], tag: &str) -> Vec<String> {
    let mut related: Vec<String> = Vec::new();
    for candidate in questions.iter().flat_map(|q| q.tags.iter()) {
        if candidate != tag && !related.contains(candidate) {
            related.push(candidate.clone());
        }
    }
    related
}

pub fn to_list_response(question: &Question, now: DateTime<Utc>) -> QuestionListResponse {
    QuestionListResponse {
        id: question.id,
        title: question.title.clone(),
        description: question.description.clone(),
        author: question.author.clone(),
        votes: question.votes,
        answer_count: question.answer_count(),
        views: question.views,
        tags: question.tags.clone(),
        has_accepted_answer: question.has_accepted_answer(),
        created_at: question.created_at,
        time_ago: format_time_ago(now, question.created_at),
    }
}

/// Validates the draft and stores it as a new question by `user`.
///
/// Signed-out callers are ignored. Validation failures come back as
/// `AppError::Validation` with one message per offending field.
pub fn submit_question(
    repo: &mut dyn QuestionRepository,
    user: Option<&User>,
    draft: &QuestionDraft,
    max_tags: usize,
) -> Result<Outcome<Question>> {
    let Some(user) = user else {
        tracing::debug!("Ignoring question submission while signed out");
        return Ok(Outcome::Ignored(IgnoreReason::SignedOut));
    };

    // Tags are normalized first so blank or rejected entries count as missing.
    let draft = QuestionDraft {
        tags: TagInput::from_tags(max_tags, &draft.tags).into_tags(),
        ..draft.clone()
    };
    draft.validate()?;

    let question = Question {
        id: repo.next_question_id(),
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        author: user.username.clone(),
        author_id: user.id,
        votes: 0,
        views: 0,
        tags: draft.tags,
        created_at: Utc::now(),
        answers: Vec::new(),
    };

    repo.save_question(question.clone())?;
    tracing::info!(
        "Question {} posted by {} with tags {:?}",
        question.id,
        user.username,
        question.tags
    );

    Ok(Outcome::Applied(question))
}
