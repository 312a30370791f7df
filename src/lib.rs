// src/lib.rs

pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod render;
pub mod routes;
pub mod scoring;
pub mod service;
pub mod state;
pub mod terminal;

// Re-export specific items for convenience if needed
pub use controller::{QuizController, QuizEvent, QuizPhase};
pub use routes::create_router;
