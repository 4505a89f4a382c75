use crate::{
    error::{AppError, Result},
    models::{
        AnswerId, IgnoreReason, Outcome, Question, User, VoteDirection, VoteLedger, VoteMode,
        VoteResponse, VoteTarget,
    },
    store::QuestionRepository,
};

/// Change to a stored counter when `direction` replaces `previous`.
pub fn vote_delta(
    mode: VoteMode,
    previous: Option<VoteDirection>,
    direction: VoteDirection,
) -> i32 {
    match mode {
        VoteMode::Strict => 0,
        VoteMode::Optimistic => match previous {
            None => direction.delta(),
            Some(prev) if prev == direction => 0,
            Some(prev) => direction.delta() - prev.delta(),
        },
    }
}

fn question_for_answer(repo: &dyn QuestionRepository, answer_id: AnswerId) -> Result<Question> {
    repo.load_questions()?
        .into_iter()
        .find(|q| q.answer(answer_id).is_some())
        .ok_or_else(|| AppError::NotFound("Answer not found".to_string()))
}

/// Records the user's vote on a question or answer.
///
/// In strict mode the stored counters are left alone; optimistic mode applies
/// the change locally.
pub fn cast_vote(
    repo: &mut dyn QuestionRepository,
    ledger: &mut VoteLedger,
    mode: VoteMode,
    user: Option<&User>,
    direction: VoteDirection,
    target: VoteTarget,
) -> Result<Outcome<VoteResponse>> {
    let Some(user) = user else {
        tracing::debug!("Ignoring {} vote on {} while signed out", direction, target);
        return Ok(Outcome::Ignored(IgnoreReason::SignedOut));
    };

    let mut question = match target {
        VoteTarget::Question(id) => repo
            .get_question(id)?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?,
        VoteTarget::Answer(id) => question_for_answer(repo, id)?,
    };

    let previous_vote = ledger.record(user.id, target, direction);
    let delta = vote_delta(mode, previous_vote, direction);

    let votes = match target {
        VoteTarget::Question(_) => {
            question.votes = question.votes.saturating_add(delta);
            question.votes
        }
        VoteTarget::Answer(id) => {
            let answer = question
                .answer_mut(id)
                .ok_or_else(|| AppError::Internal(format!("Answer {} vanished", id)))?;
            answer.votes = answer.votes.saturating_add(delta);
            answer.votes
        }
    };

    if delta != 0 {
        repo.replace_question(question.id, question)?;
    }

    tracing::info!(
        "{} vote on {} by user {} ({:?} mode, delta {})",
        direction,
        target,
        user.id,
        mode,
        delta
    );

    Ok(Outcome::Applied(VoteResponse {
        target,
        user_vote: direction,
        previous_vote,
        votes,
    }))
}
