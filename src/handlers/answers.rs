use crate::{
    AppState,
    error::Result,
    models::{Answer, AnswerId, Outcome, Question, QuestionId},
    services::answer_service,
};

pub fn create_answer(
    state: &mut AppState,
    question_id: QuestionId,
    content: &str,
) -> Result<Outcome<Answer>> {
    answer_service::submit_answer(
        state.store.as_mut(),
        state.session.current_user(),
        question_id,
        content,
    )
}

pub fn accept_answer(
    state: &mut AppState,
    question_id: QuestionId,
    answer_id: AnswerId,
) -> Result<Outcome<Question>> {
    let outcome = answer_service::accept_answer(
        state.store.as_mut(),
        state.session.current_user(),
        question_id,
        answer_id,
    )?;

    if let Outcome::Applied(question) = &outcome {
        state
            .notifications
            .notify_answer_accepted(question.id, &question.title);
    }

    Ok(outcome)
}
