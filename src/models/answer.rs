use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{UserId, VoteDirection};

pub type AnswerId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub content: String,
    pub author: String,
    pub author_id: UserId,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_accepted: bool,
}

// Answer as shown on the question page
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: AnswerId,
    pub content: String,
    pub author: String,
    pub author_id: UserId,
    pub votes: i32,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
    pub user_vote: Option<VoteDirection>,
}
