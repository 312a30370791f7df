// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{question::QuestionBank, submission::SubmitRequest},
    scoring,
};

/// Returns every question with its options, in bank order.
/// Answer keys are stripped by the public DTO.
pub async fn get_questions(
    State(bank): State<Arc<QuestionBank>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(bank.public()))
}

/// Scores a submitted answer list.
///
/// * Expects one option index per question, in question order.
/// * Returns the score, the question count and per-question feedback.
pub async fn submit_answers(
    State(bank): State<Arc<QuestionBank>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let result = scoring::grade(&bank, &req.answers).map_err(|e| {
        tracing::warn!("Rejected submission: {}", e);
        e
    })?;

    tracing::info!(
        "Graded submission: {} / {}",
        result.score,
        result.total_questions
    );

    Ok(Json(result))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        models::{question::QuestionBank, submission::ScoringResult},
        routes::create_router,
        state::AppState,
    };

    fn app() -> axum::Router {
        let bank = QuestionBank::from_json(
            r#"{
                "questions": [
                    { "question": "2 + 2?", "options": ["3", "4"], "answer": 1 },
                    { "question": "Sky colour?", "options": ["Blue", "Green"], "answer": 0 }
                ]
            }"#,
        )
        .unwrap();
        create_router(AppState::new(bank))
    }

    fn submit(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/submit")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn questions_endpoint_hides_answers() {
        let response = app()
            .oneshot(Request::get("/api/questions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["questions"].as_array().unwrap().len(), 2);
        assert!(json["questions"][0].get("answer").is_none());
    }

    #[tokio::test]
    async fn submit_endpoint_grades() {
        let response = app().oneshot(submit(r#"{"answers":[1,1]}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let result: ScoringResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.feedback[1].user_answer, "Green");
        assert_eq!(result.feedback[1].correct_answer, "Blue");
    }

    #[tokio::test]
    async fn malformed_submit_is_bad_request() {
        for body in [r#"{"answers":[1]}"#, r#"{"answers":"x"}"#, r#"{"answers":[1,9]}"#] {
            let response = app().oneshot(submit(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
