// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::models::question::QuestionBank;

#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
}

impl AppState {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank: Arc::new(bank),
        }
    }
}

impl FromRef<AppState> for Arc<QuestionBank> {
    fn from_ref(state: &AppState) -> Self {
        state.bank.clone()
    }
}
