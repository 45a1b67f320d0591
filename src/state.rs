//! Application state shared across handlers

use std::sync::Arc;

use crate::db::TriviaRepository;

/// Per-request handle to the store, injected through axum `State`.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<dyn TriviaRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn TriviaRepository>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &dyn TriviaRepository {
        self.repo.as_ref()
    }
}
