use axum::extract::{Path, State};
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::JsonPayload;
use crate::{
    auth::AdminUser,
    content::{DiyDraft, FaqDraft, LinkDraft, NewsDraft, RobotDraft},
    error::{ApiError, Result},
    state::AppState,
    storage::{
        ContentStorage, DBPool, DiyProject, FaqItem, NewsArticle, RobotCatalogEntry, UsefulLink,
    },
};

/// 配置管理端路由，全部要求 admin 角色。
///
/// 每个内容集合提供 create/update/delete 镜像；
/// 聊天消息只有软删除。
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/news", post(news_create))
        .route("/news/{id}", put(news_update).delete(news_delete))
        .route("/robots", post(robot_create))
        .route("/robots/{id}", put(robot_update).delete(robot_delete))
        .route("/faq", post(faq_create))
        .route("/faq/{id}", put(faq_update).delete(faq_delete))
        .route("/diy", post(diy_create))
        .route("/diy/{id}", put(diy_update).delete(diy_delete))
        .route("/useful-links", post(link_create))
        .route("/useful-links/{id}", put(link_update).delete(link_delete))
        .route("/chat/messages/{id}", delete(chat_message_delete))
}

/// 删除成功的统一响应体
fn deleted() -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn news_create(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    JsonPayload(draft): JsonPayload<NewsDraft>,
) -> Result<Json<NewsArticle>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    Ok(Json(store.insert_news(&draft).await?))
}

async fn news_update(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
    JsonPayload(draft): JsonPayload<NewsDraft>,
) -> Result<Json<NewsArticle>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    let article = store
        .update_news(id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(article))
}

async fn news_delete(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let mut store = &pool;
    if !store.delete_news(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(deleted())
}

async fn robot_create(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    JsonPayload(draft): JsonPayload<RobotDraft>,
) -> Result<Json<RobotCatalogEntry>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    Ok(Json(store.insert_robot(&draft).await?))
}

async fn robot_update(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
    JsonPayload(draft): JsonPayload<RobotDraft>,
) -> Result<Json<RobotCatalogEntry>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    let robot = store
        .update_robot(id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(robot))
}

async fn robot_delete(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let mut store = &pool;
    if !store.delete_robot(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(deleted())
}

async fn faq_create(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    JsonPayload(draft): JsonPayload<FaqDraft>,
) -> Result<Json<FaqItem>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    Ok(Json(store.insert_faq(&draft).await?))
}

async fn faq_update(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
    JsonPayload(draft): JsonPayload<FaqDraft>,
) -> Result<Json<FaqItem>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    let item = store
        .update_faq(id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(item))
}

async fn faq_delete(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let mut store = &pool;
    if !store.delete_faq(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(deleted())
}

async fn diy_create(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    JsonPayload(draft): JsonPayload<DiyDraft>,
) -> Result<Json<DiyProject>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    Ok(Json(store.insert_diy(&draft).await?))
}

async fn diy_update(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
    JsonPayload(draft): JsonPayload<DiyDraft>,
) -> Result<Json<DiyProject>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    let project = store
        .update_diy(id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(project))
}

async fn diy_delete(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let mut store = &pool;
    if !store.delete_diy(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(deleted())
}

async fn link_create(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    JsonPayload(draft): JsonPayload<LinkDraft>,
) -> Result<Json<UsefulLink>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    Ok(Json(store.insert_link(&draft).await?))
}

async fn link_update(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
    JsonPayload(draft): JsonPayload<LinkDraft>,
) -> Result<Json<UsefulLink>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    let link = store
        .update_link(id, &draft)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(link))
}

async fn link_delete(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let mut store = &pool;
    if !store.delete_link(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(deleted())
}

/// 软删除聊天消息，消息行保留、不再出现在列表里。
async fn chat_message_delete(
    AdminUser(_): AdminUser,
    State(pool): State<DBPool>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let mut store = &pool;
    if !store.soft_delete_chat_message(id).await? {
        return Err(ApiError::NotFound.into());
    }
    Ok(deleted())
}
