use uuid::Uuid;

use crate::{AppState, error::Result, models::NotificationListResponse};

pub fn get_notifications(state: &AppState) -> NotificationListResponse {
    state.notifications.get_notifications()
}

pub fn mark_notification_read(state: &mut AppState, id: Uuid) -> Result<NotificationListResponse> {
    state.notifications.mark_notification_read(id)?;
    Ok(state.notifications.get_notifications())
}

pub fn mark_all_notifications_read(state: &mut AppState) -> NotificationListResponse {
    state.notifications.mark_all_notifications_read();
    state.notifications.get_notifications()
}
