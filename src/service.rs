// src/service.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use crate::{
    error::QuizError,
    models::{
        question::{QuestionBank, QuizBank},
        submission::{ScoringResult, SubmitRequest},
    },
    scoring,
};

pub const QUESTIONS_PATH: &str = "/api/questions";
pub const SUBMIT_PATH: &str = "/api/submit";

/// The two calls a quiz session makes: load the bank, score the answers.
///
/// Implementations must return one feedback entry per submitted answer, in
/// the same order, with `is_correct` set iff the submitted index equals the
/// question's answer key.
#[async_trait]
pub trait QuizService: Send + Sync {
    async fn fetch_questions(&self) -> Result<QuizBank, QuizError>;

    async fn submit_answers(&self, request: &SubmitRequest) -> Result<ScoringResult, QuizError>;
}

/// Talks to a quiz server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpQuizService {
    client: Client,
    base_url: Url,
}

impl HttpQuizService {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, QuizError> {
        let url = Url::parse(base_url)
            .map_err(|e| QuizError::Config(format!("invalid server url '{}': {}", base_url, e)))?;
        Ok(Self::new(url))
    }

    fn endpoint(&self, path: &str) -> Result<Url, QuizError> {
        self.base_url
            .join(path)
            .map_err(|e| QuizError::Config(e.to_string()))
    }
}

/// Turns non-2xx responses into `QuizError::Status`, lifting the server's
/// `{"error": ...}` message when there is one.
async fn check_status(response: Response) -> Result<Response, QuizError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);

    Err(QuizError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl QuizService for HttpQuizService {
    async fn fetch_questions(&self) -> Result<QuizBank, QuizError> {
        let url = self.endpoint(QUESTIONS_PATH)?;
        tracing::debug!("GET {}", url);

        let response = check_status(self.client.get(url).send().await?).await?;
        let bank: QuizBank = response.json().await?;
        bank.verify()?;
        Ok(bank)
    }

    async fn submit_answers(&self, request: &SubmitRequest) -> Result<ScoringResult, QuizError> {
        let url = self.endpoint(SUBMIT_PATH)?;
        tracing::debug!("POST {} ({} answers)", url, request.answers.len());

        let response = check_status(self.client.post(url).json(request).send().await?).await?;
        let result: ScoringResult = response.json().await?;
        result.verify(request.answers.len())?;
        Ok(result)
    }
}

/// Serves a bank in-process, no network involved.
#[derive(Debug, Clone)]
pub struct LocalQuizService {
    bank: QuestionBank,
}

impl LocalQuizService {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }
}

#[async_trait]
impl QuizService for LocalQuizService {
    async fn fetch_questions(&self) -> Result<QuizBank, QuizError> {
        let bank = self.bank.public();
        bank.verify()?;
        Ok(bank)
    }

    async fn submit_answers(&self, request: &SubmitRequest) -> Result<ScoringResult, QuizError> {
        scoring::grade(&self.bank, &request.answers)
            .map_err(|e| QuizError::BadResponse(e.to_string()))
    }
}
