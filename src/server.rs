use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Config;
use crate::error::CodesmithError;
use crate::languages::{merged_options, LanguageEntry, LanguageStore};
use crate::models::{
    CommentParams, ExplainParams, GenerateParams, Mode, RenderModel, ReviewParams,
};
use crate::service::CodesmithService;
use crate::visual::{code_block, view_for, ModeView};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CodesmithService>,
    pub languages: Arc<dyn LanguageStore>,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/generate", post(generate))
        .route("/api/explain", post(explain))
        .route("/api/review", post(review))
        .route("/api/comment", post(comment))
        .route("/api/languages", get(list_languages).post(create_language))
        .route("/api/view/:mode", get(view))
        .with_state(state)
}

/// Boundary error wrapper. Validation problems are the caller's fault;
/// everything else means the completion endpoint let us down.
struct ApiError(CodesmithError);

impl From<CodesmithError> for ApiError {
    fn from(err: CodesmithError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CodesmithError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_GATEWAY,
        };
        // The raw cause is logged here at the boundary; the body carries the
        // user-facing message only.
        tracing::error!(error = %self.0, "Request failed");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn require_input(value: &str, mode: Mode) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError(CodesmithError::Validation(
            view_for(mode).empty_input_message.to_string(),
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateOutput {
    content: String,
    pure_code: String,
    html: String,
}

#[derive(Debug, Serialize)]
struct HtmlOutput {
    html: String,
}

async fn generate(
    State(state): State<AppState>,
    Json(params): Json<GenerateParams>,
) -> Result<Json<GenerateOutput>, ApiError> {
    require_input(&params.description, Mode::Generate)?;
    let language = params.language.clone();
    let model = state.service.generate(params).await?;
    match model {
        RenderModel::Code { content, pure_code } => {
            let html = code_block(&language, &content);
            Ok(Json(GenerateOutput {
                content,
                pure_code,
                html,
            }))
        }
        RenderModel::Html { .. } => Err(ApiError(CodesmithError::Internal(
            "generate projected to an HTML fragment".to_string(),
        ))),
    }
}

async fn explain(
    State(state): State<AppState>,
    Json(params): Json<ExplainParams>,
) -> Result<Json<HtmlOutput>, ApiError> {
    require_input(&params.code, Mode::Explain)?;
    let model = state.service.explain(params).await?;
    Ok(Json(HtmlOutput {
        html: model.as_text().to_string(),
    }))
}

async fn review(
    State(state): State<AppState>,
    Json(params): Json<ReviewParams>,
) -> Result<Json<HtmlOutput>, ApiError> {
    require_input(&params.code, Mode::Review)?;
    let model = state.service.review(params).await?;
    Ok(Json(HtmlOutput {
        html: model.as_text().to_string(),
    }))
}

async fn comment(
    State(state): State<AppState>,
    Json(params): Json<CommentParams>,
) -> Result<Json<HtmlOutput>, ApiError> {
    require_input(&params.code, Mode::Comment)?;
    let model = state.service.comment(params).await?;
    Ok(Json(HtmlOutput {
        html: model.as_text().to_string(),
    }))
}

#[derive(Debug, Serialize)]
struct LanguagesOutput {
    entries: Vec<LanguageEntry>,
    options: Vec<String>,
}

async fn list_languages(State(state): State<AppState>) -> Json<LanguagesOutput> {
    let entries = state.languages.list();
    let options = merged_options(&state.config.languages.builtin, &entries);
    Json(LanguagesOutput { entries, options })
}

#[derive(Debug, Deserialize)]
struct CreateLanguageParams {
    name: String,
}

async fn create_language(
    State(state): State<AppState>,
    Json(params): Json<CreateLanguageParams>,
) -> Result<Json<LanguageEntry>, ApiError> {
    let entry = state.languages.create(&params.name)?;
    Ok(Json(entry))
}

async fn view(Path(mode): Path<String>) -> Result<Json<ModeView>, ApiError> {
    let mode = Mode::from_str(&mode).map_err(CodesmithError::Validation)?;
    Ok(Json(view_for(mode)))
}
