use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, Result},
    models::{
        Answer, AnswerId, AnswerResponse, IgnoreReason, Outcome, Question, QuestionId, User,
        VoteLedger, VoteTarget,
    },
    store::QuestionRepository,
    utils::format_time_ago,
};

/// Appends a new answer by `user` to the question.
///
/// Signed-out callers and blank content are ignored.
pub fn submit_answer(
    repo: &mut dyn QuestionRepository,
    user: Option<&User>,
    question_id: QuestionId,
    content: &str,
) -> Result<Outcome<Answer>> {
    let Some(user) = user else {
        tracing::debug!("Ignoring answer on question {} while signed out", question_id);
        return Ok(Outcome::Ignored(IgnoreReason::SignedOut));
    };

    let content = content.trim();
    if content.is_empty() {
        tracing::debug!("Ignoring empty answer on question {}", question_id);
        return Ok(Outcome::Ignored(IgnoreReason::EmptyContent));
    }

    if repo.get_question(question_id)?.is_none() {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    let answer = Answer {
        id: repo.next_answer_id(),
        content: content.to_string(),
        author: user.username.clone(),
        author_id: user.id,
        votes: 0,
        created_at: Utc::now(),
        is_accepted: false,
    };

    repo.save_answer(question_id, answer.clone())?;
    tracing::info!(
        "Answer {} posted on question {} by {}",
        answer.id,
        question_id,
        user.username
    );

    Ok(Outcome::Applied(answer))
}

/// Marks `answer_id` as the accepted answer, clearing any previous one.
///
/// Only the question's author may accept; anyone else is ignored.
pub fn accept_answer(
    repo: &mut dyn QuestionRepository,
    user: Option<&User>,
    question_id: QuestionId,
    answer_id: AnswerId,
) -> Result<Outcome<Question>> {
    let Some(user) = user else {
        tracing::debug!("Ignoring accept on question {} while signed out", question_id);
        return Ok(Outcome::Ignored(IgnoreReason::SignedOut));
    };

    let mut question = repo
        .get_question(question_id)?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    if question.author_id != user.id {
        tracing::debug!(
            "User {} is not the author of question {}, ignoring accept",
            user.id,
            question_id
        );
        return Ok(Outcome::Ignored(IgnoreReason::NotQuestionAuthor));
    }

    if question.answer(answer_id).is_none() {
        return Err(AppError::NotFound("Answer not found".to_string()));
    }

    for answer in question.answers.iter_mut() {
        answer.is_accepted = answer.id == answer_id;
    }

    repo.replace_question(question_id, question.clone())?;
    tracing::info!("Answer {} accepted on question {}", answer_id, question_id);

    Ok(Outcome::Applied(question))
}

pub fn to_answer_response(
    answer: &Answer,
    viewer: Option<&User>,
    votes: &VoteLedger,
    now: DateTime<Utc>,
) -> AnswerResponse {
    AnswerResponse {
        id: answer.id,
        content: answer.content.clone(),
        author: answer.author.clone(),
        author_id: answer.author_id,
        votes: answer.votes,
        is_accepted: answer.is_accepted,
        created_at: answer.created_at,
        time_ago: format_time_ago(now, answer.created_at),
        user_vote: viewer.and_then(|u| votes.get(u.id, VoteTarget::Answer(answer.id))),
    }
}
