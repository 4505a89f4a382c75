use chrono::Utc;
use serde::Deserialize;

use crate::{
    AppState,
    error::{FieldErrors, Result},
    models::{
        AskPage, HomePage, NotFoundPage, Outcome, Page, Question, QuestionDraft, QuestionFilter,
        QuestionId, QuestionPage, QuestionResponse, QuestionSort, VoteDirection, VoteResponse,
        VoteTarget,
    },
    services::{answer_service, question_service, vote_service},
    utils::{format_time_ago, pluralize},
};

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct GetQuestionsQuery {
    pub sort: Option<QuestionSort>,
    pub filter: Option<QuestionFilter>,
}

pub fn get_questions(state: &AppState, query: GetQuestionsQuery) -> Result<HomePage> {
    let sort = query.sort.unwrap_or_default();
    let filter = query.filter.unwrap_or_default();
    let questions = question_service::get_questions(state.store.as_ref(), sort, filter)?;
    let now = Utc::now();

    let empty_message = questions
        .is_empty()
        .then(|| "No questions found matching your criteria.".to_string());

    Ok(HomePage {
        heading: "All Questions".to_string(),
        count_label: pluralize(questions.len(), "question"),
        sort,
        filter,
        can_ask: state.session.is_signed_in(),
        questions: questions
            .iter()
            .map(|q| question_service::to_list_response(q, now))
            .collect(),
        empty_message,
    })
}

pub fn get_question(state: &AppState, question_id: QuestionId) -> Result<Page> {
    let Some(mut question) = question_service::get_question_by_id(state.store.as_ref(), question_id)?
    else {
        return Ok(Page::NotFound(NotFoundPage::new("Question not found")));
    };

    question_service::order_answers(&mut question.answers);

    let now = Utc::now();
    let viewer = state.session.current_user();
    let can_accept = viewer.is_some_and(|u| u.id == question.author_id);

    let response = QuestionResponse {
        id: question.id,
        title: question.title.clone(),
        description: question.description.clone(),
        author: question.author.clone(),
        author_id: question.author_id,
        votes: question.votes,
        views: question.views,
        tags: question.tags.clone(),
        created_at: question.created_at,
        time_ago: format_time_ago(now, question.created_at),
        user_vote: viewer.and_then(|u| state.votes.get(u.id, VoteTarget::Question(question.id))),
        answer_count_label: pluralize(question.answer_count(), "Answer"),
        answers: question
            .answers
            .iter()
            .map(|a| answer_service::to_answer_response(a, viewer, &state.votes, now))
            .collect(),
    };

    Ok(Page::Question(QuestionPage {
        question: response,
        can_accept,
        can_answer: viewer.is_some(),
    }))
}

/// The ask form, optionally carrying a rejected draft and its errors.
pub fn ask_form(state: &AppState, draft: QuestionDraft, errors: FieldErrors) -> AskPage {
    AskPage {
        signed_in: state.session.is_signed_in(),
        draft,
        errors,
        max_tags: state.config.max_tags,
    }
}

pub fn create_question(state: &mut AppState, draft: &QuestionDraft) -> Result<Outcome<Question>> {
    let outcome = question_service::submit_question(
        state.store.as_mut(),
        state.session.current_user(),
        draft,
        state.config.max_tags,
    )?;

    if let Outcome::Applied(question) = &outcome {
        state
            .notifications
            .notify_question_posted(question.id, &question.title);
    }

    Ok(outcome)
}

pub fn vote(
    state: &mut AppState,
    direction: VoteDirection,
    target: VoteTarget,
) -> Result<Outcome<VoteResponse>> {
    vote_service::cast_vote(
        state.store.as_mut(),
        &mut state.votes,
        state.config.vote_mode,
        state.session.current_user(),
        direction,
        target,
    )
}
