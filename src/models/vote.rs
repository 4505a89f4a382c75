use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{AnswerId, QuestionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn delta(self) -> i32 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }
}

impl FromStr for VoteDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "Up" | "+" => Ok(VoteDirection::Up),
            "down" | "Down" | "-" => Ok(VoteDirection::Down),
            _ => Err(format!("Unknown VoteDirection: {}", s)),
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteTargetKind {
    Question,
    Answer,
}

impl FromStr for VoteTargetKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" | "Question" => Ok(VoteTargetKind::Question),
            "answer" | "Answer" => Ok(VoteTargetKind::Answer),
            _ => Err(format!("Unknown VoteTargetKind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target_type", content = "target_id", rename_all = "lowercase")]
pub enum VoteTarget {
    Question(QuestionId),
    Answer(AnswerId),
}

impl VoteTarget {
    pub fn new(kind: VoteTargetKind, id: u64) -> Self {
        match kind {
            VoteTargetKind::Question => VoteTarget::Question(id),
            VoteTargetKind::Answer => VoteTarget::Answer(id),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteTarget::Question(id) => write!(f, "question-{}", id),
            VoteTarget::Answer(id) => write!(f, "answer-{}", id),
        }
    }
}

/// How a cast vote affects the stored `votes` counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteMode {
    /// The vote is recorded for the viewer only; counters stay as loaded.
    #[default]
    Strict,
    /// Counters are adjusted locally as votes are cast or switched.
    Optimistic,
}

impl FromStr for VoteMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "strict" | "Strict" => Ok(VoteMode::Strict),
            "optimistic" | "Optimistic" => Ok(VoteMode::Optimistic),
            other => Err(format!("Unknown VoteMode: {}", other)),
        }
    }
}

/// Session-only record of each user's vote per target.
#[derive(Debug, Default)]
pub struct VoteLedger {
    votes: HashMap<(UserId, VoteTarget), VoteDirection>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a vote and returns the direction it replaced, if any.
    pub fn record(
        &mut self,
        user_id: UserId,
        target: VoteTarget,
        direction: VoteDirection,
    ) -> Option<VoteDirection> {
        self.votes.insert((user_id, target), direction)
    }

    pub fn get(&self, user_id: UserId, target: VoteTarget) -> Option<VoteDirection> {
        self.votes.get(&(user_id, target)).copied()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

// Vote response
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub target: VoteTarget,
    pub user_vote: VoteDirection,
    pub previous_vote: Option<VoteDirection>,
    pub votes: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_keeps_one_entry_per_user_and_target() {
        let mut ledger = VoteLedger::new();
        let target = VoteTarget::Answer(7);

        assert_eq!(ledger.record(1, target, VoteDirection::Up), None);
        assert_eq!(
            ledger.record(1, target, VoteDirection::Down),
            Some(VoteDirection::Up)
        );
        ledger.record(2, target, VoteDirection::Up);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(1, target), Some(VoteDirection::Down));
        assert_eq!(ledger.get(1, VoteTarget::Question(7)), None);
    }

    #[test]
    fn test_question_and_answer_targets_are_distinct() {
        assert_ne!(VoteTarget::Question(3), VoteTarget::Answer(3));
        assert_eq!(VoteTarget::Question(3).to_string(), "question-3");
    }
}
