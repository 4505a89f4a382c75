use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Notification, NotificationListResponse, NotificationType, QuestionId},
};

/// Notifications for the current session, newest first.
#[derive(Debug, Default)]
pub struct NotificationService {
    notifications: Vec<Notification>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new notification and put it at the top of the list
    pub fn create_notification(
        &mut self,
        notification_type: NotificationType,
        title: String,
        content: Option<String>,
        question_id: Option<QuestionId>,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            notification_type,
            title,
            content,
            question_id,
            is_read: false,
            created_at: Utc::now(),
        };

        tracing::debug!(
            "Notification {} ({:?}) added",
            notification.id,
            notification.notification_type
        );
        self.notifications.insert(0, notification.clone());
        notification
    }

    pub fn notify_question_posted(&mut self, question_id: QuestionId, title: &str) -> Notification {
        self.create_notification(
            NotificationType::QuestionPosted,
            "Your question was posted".to_string(),
            Some(title.to_string()),
            Some(question_id),
        )
    }

    pub fn notify_answer_accepted(&mut self, question_id: QuestionId, title: &str) -> Notification {
        self.create_notification(
            NotificationType::AnswerAccepted,
            "You accepted an answer".to_string(),
            Some(title.to_string()),
            Some(question_id),
        )
    }

    pub fn get_notifications(&self) -> NotificationListResponse {
        NotificationListResponse {
            unread_count: self.get_unread_count(),
            notifications: self.notifications.clone(),
        }
    }

    /// Mark one notification as read
    pub fn mark_notification_read(&mut self, id: Uuid) -> Result<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;
        notification.is_read = true;
        Ok(())
    }

    pub fn mark_all_notifications_read(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.is_read = true;
        }
    }

    pub fn get_unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Drops everything; the list belongs to whoever is signed in.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}
