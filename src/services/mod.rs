pub mod answer_service;
pub mod auth_service;
pub mod notification_service;
pub mod question_service;
pub mod vote_service;
