use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::JsonPayload;
use crate::{
    auth::CurrentUser,
    content::ChatMessageDraft,
    error::Result,
    state::AppState,
    storage::{ChatMessage, ContentQuery, ContentStorage, DBPool},
};

/// 配置聊天室路由。
///
/// - `GET /chat/messages`：公开，最近 100 条未删除消息
/// - `POST /chat/messages`：需要登录
pub fn setup_route() -> Router<AppState> {
    Router::new().route("/chat/messages", get(messages_list).post(messages_post))
}

/// 聊天记录，按时间升序。
///
/// 前端每 3 秒轮询一次，这里不保留任何连接状态。
async fn messages_list(State(pool): State<DBPool>) -> Result<Json<Vec<ChatMessage>>> {
    let messages = (&pool).chat_messages().await?;
    Ok(Json(messages))
}

/// 追加一条聊天消息。
///
/// 消息长度 1 到 1000 字符；发送者取自当前会话，
/// 展示名在 name 为空时退回 email。
async fn messages_post(
    CurrentUser(user): CurrentUser,
    State(pool): State<DBPool>,
    JsonPayload(draft): JsonPayload<ChatMessageDraft>,
) -> Result<Json<ChatMessage>> {
    let draft = draft.validated()?;

    let mut store = &pool;
    let message = store
        .insert_chat_message(&user.id, user.display_name(), &draft)
        .await?;

    Ok(Json(message))
}
