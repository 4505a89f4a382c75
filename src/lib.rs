pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::{
    auth::Session,
    config::Config,
    error::Result,
    models::VoteLedger,
    services::{auth_service::UserDirectory, notification_service::NotificationService},
    store::{InMemoryQuestionStore, QuestionRepository},
};

/// Everything a handler can reach: built once at startup and passed down by
/// reference.
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Box<dyn QuestionRepository>,
    pub session: Session,
    pub users: UserDirectory,
    pub votes: VoteLedger,
    pub notifications: NotificationService,
}

impl AppState {
    /// Loads the configured seed (or the bundled one) into an in-memory store.
    pub fn new(config: Config) -> Result<Self> {
        let store = match &config.seed_file {
            Some(path) => InMemoryQuestionStore::from_seed_file(path)?,
            None => InMemoryQuestionStore::seeded()?,
        };
        let users = UserDirectory::new(store.known_users());
        Ok(Self::from_parts(config, Box::new(store), users))
    }

    pub fn from_parts(
        config: Config,
        store: Box<dyn QuestionRepository>,
        users: UserDirectory,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            session: Session::new(),
            users,
            votes: VoteLedger::new(),
            notifications: NotificationService::new(),
        }
    }
}
