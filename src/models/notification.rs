use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::QuestionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    QuestionPosted,
    AnswerAccepted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub content: Option<String>,
    pub question_id: Option<QuestionId>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// Notification list response
#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub unread_count: usize,
    pub notifications: Vec<Notification>,
}
