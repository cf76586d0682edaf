use chrono::{DateTime, Utc};
use serde::Serialize;

/// 新闻文章
///
/// 列表默认按发布时间倒序。`is_auto_generated` 标记抓取生成的内容，
/// 管理端创建的文章恒为 false。
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub source_url: Option<String>,
    pub source_name: Option<String>,
    /// 发布时间，序列化为 Unix 毫秒
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub published_at: DateTime<Utc>,
    pub is_auto_generated: bool,
}

/// 机器人图鉴条目
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RobotCatalogEntry {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    /// 展示用价格文本，不做数值运算
    pub price: Option<String>,
    pub official_website: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// FAQ 条目，按 `sort_order` 升序展示
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
}

/// DIY 项目
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiyProject {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub image_url: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// 聊天消息
///
/// 只追加不修改；`is_deleted` 为单向软删除标记，置真后不再出现在列表里。
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    /// 认证服务分配的用户 id，文本格式
    pub user_id: String,
    pub user_name: String,
    pub message: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// 实用链接，按分类分组，组内按 (sort_order, created_at DESC) 排序
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UsefulLink {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub icon_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}
