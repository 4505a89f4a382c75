use serde::Serialize;

/// Why a mutation was dropped without effect. These are never surfaced as
/// errors; the caller just re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    SignedOut,
    NotQuestionAuthor,
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Applied(T),
    Ignored(IgnoreReason),
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Ignored(_) => None,
        }
    }

    pub fn ignored_reason(&self) -> Option<IgnoreReason> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Ignored(reason) => Some(*reason),
        }
    }
}
