use crate::engine::{Answer, QaEngine, QaOptions};
use crate::ranking::{ScoredDocument, ScoredSentence};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub q: String,
    #[serde(default)]
    pub files: Option<NonZeroUsize>,
    #[serde(default)]
    pub sentences: Option<NonZeroUsize>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub query: Vec<String>,
    pub files: Vec<ScoredDocument>,
    pub sentences: Vec<ScoredSentence>,
}

impl AskResponse {
    fn new(question: String, answer: Answer) -> Self {
        Self {
            question,
            answer: answer.best().map(str::to_string),
            query: answer.query,
            files: answer.files,
            sentences: answer.sentences,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);
        tracing::error!("API error: {}", message);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn ask(
    State(state): State<AppState>,
    Query(req): Query<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let options = QaOptions {
        file_matches: req.files.unwrap_or(state.options.file_matches),
        sentence_matches: req.sentences.unwrap_or(state.options.sentence_matches),
    };

    let answer = state.engine.answer(&req.q, &options)?;

    Ok(Json(ApiResponse::success(AskResponse::new(req.q, answer))))
}

async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.engine.stats()))
}

// ========== Router ==========

#[derive(Clone)]
struct AppState {
    engine: Arc<QaEngine>,
    options: QaOptions,
}

/// Routes over a shared engine. `options` are the defaults for requests that
/// don't set `files` / `sentences`.
pub fn create_router(engine: Arc<QaEngine>, options: QaOptions) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ask", get(ask))
        .route("/stats", get(get_stats))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(AppState { engine, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn app() -> Router {
        let files: BTreeMap<String, String> = [
            ("cats.txt", "Cats are small carnivorous mammals. Cats sleep a lot."),
            ("dogs.txt", "Dogs are loyal companions. Dogs were domesticated from wolves."),
        ]
        .into_iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect();

        let engine = Arc::new(QaEngine::new(files, Tokenizer::new()));
        create_router(engine, QaOptions::default())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_ask() {
        let (status, body) = get_json(app(), "/ask?q=What%20were%20dogs%20domesticated%20from%3F").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["files"][0]["doc_id"], "dogs.txt");
        assert_eq!(body["data"]["answer"], "Dogs were domesticated from wolves.");
    }

    #[tokio::test]
    async fn test_ask_with_overrides() {
        let (status, body) = get_json(app(), "/ask?q=cats&files=2&sentences=4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["files"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["data"]["sentences"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_ask_rejects_zero_matches() {
        let (status, _) = get_json(app(), "/ask?q=cats&files=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats() {
        let (status, body) = get_json(app(), "/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_documents"], 2);
    }
}
