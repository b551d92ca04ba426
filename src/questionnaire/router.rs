use std::collections::HashSet;

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::assignment::{assign_theme, UpdateInstruction};
use super::domain::{AnswerRecord, CategoryId, Question, Theme, UserId};
use super::hierarchy::{organize, CategoryBucket, OrganizedQuestion};
use super::merge::{merge, MergeResult};

/// Router exposing the pure engines as JSON-in/JSON-out endpoints. The data
/// in each request has already been fetched and authorization-filtered by the
/// caller; nothing here touches storage.
pub fn bank_router() -> Router {
    Router::new()
        .route("/api/v1/bank/organize", post(organize_handler))
        .route("/api/v1/bank/merge", post(merge_handler))
        .route("/api/v1/bank/assign-theme", post(assign_theme_handler))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrganizeRequest {
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrganizeResponse {
    pub(crate) questions: Vec<OrganizedQuestion>,
    pub(crate) categories: Vec<CategoryBucket>,
    pub(crate) warnings: Vec<String>,
}

pub(crate) async fn organize_handler(
    Json(request): Json<OrganizeRequest>,
) -> Json<OrganizeResponse> {
    let bank = organize(&request.questions);
    Json(OrganizeResponse {
        questions: bank.questions,
        categories: bank.categories,
        warnings: bank
            .warnings
            .iter()
            .map(|warning| warning.to_string())
            .collect(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MergeRequest {
    pub(crate) question: Question,
    #[serde(default)]
    pub(crate) answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub(crate) relevant_user_ids: Vec<UserId>,
}

pub(crate) async fn merge_handler(Json(request): Json<MergeRequest>) -> Json<MergeResult> {
    let relevant: HashSet<UserId> = request.relevant_user_ids.iter().copied().collect();
    Json(merge(&request.question, &request.answers, &relevant))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignThemeRequest {
    #[serde(default)]
    pub(crate) category_id: Option<CategoryId>,
    pub(crate) theme: Theme,
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignThemeResponse {
    pub(crate) instructions: Vec<UpdateInstruction>,
}

pub(crate) async fn assign_theme_handler(
    Json(request): Json<AssignThemeRequest>,
) -> Json<AssignThemeResponse> {
    let instructions = assign_theme(request.category_id, request.theme, &request.questions);
    Json(AssignThemeResponse { instructions })
}
