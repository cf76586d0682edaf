use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::{
    error::{ApiError, Result},
    state::AppState,
    storage::{
        ContentQuery, DBPool, DiyProject, FaqItem, NewsArticle, RobotCatalogEntry, UsefulLink,
    },
};

/// 配置公开内容路由。
///
/// 路由包括：
/// - `GET /news`、`GET /news/{id}`：新闻
/// - `GET /robots`、`GET /robots/{id}`：机器人图鉴
/// - `GET /faq`：FAQ 列表
/// - `GET /diy`、`GET /diy/{id}`：DIY 项目
/// - `GET /useful-links`、`GET /useful-links/{id}`：实用链接
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/news", get(news_list))
        .route("/news/{id}", get(news_get))
        .route("/robots", get(robots_list))
        .route("/robots/{id}", get(robots_get))
        .route("/faq", get(faq_list))
        .route("/diy", get(diy_list))
        .route("/diy/{id}", get(diy_get))
        .route("/useful-links", get(useful_links_list))
        .route("/useful-links/{id}", get(useful_links_get))
}

/// 查询参数，用于列表截断和分类筛选。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    limit: Option<i64>,
    category: Option<String>,
}

impl ListParams {
    /// 非正数的 limit 按未传处理
    fn limit(&self) -> Option<i64> {
        self.limit.filter(|l| *l > 0)
    }
}

/// 新闻列表，最新的在前。
async fn news_list(
    Query(params): Query<ListParams>,
    State(pool): State<DBPool>,
) -> Result<Json<Vec<NewsArticle>>> {
    let articles = (&pool).news_list(params.limit()).await?;
    Ok(Json(articles))
}

/// 根据 id 获取单条新闻，不存在返回 [`ApiError::NotFound`]。
async fn news_get(Path(id): Path<i64>, State(pool): State<DBPool>) -> Result<Json<NewsArticle>> {
    let article = (&pool).news_get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(article))
}

/// 图鉴列表，最新的在前。
async fn robots_list(
    Query(params): Query<ListParams>,
    State(pool): State<DBPool>,
) -> Result<Json<Vec<RobotCatalogEntry>>> {
    let robots = (&pool).robots_list(params.limit()).await?;
    Ok(Json(robots))
}

/// 根据 id 获取单条图鉴。
async fn robots_get(
    Path(id): Path<i64>,
    State(pool): State<DBPool>,
) -> Result<Json<RobotCatalogEntry>> {
    let robot = (&pool).robots_get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(robot))
}

/// FAQ 列表，按显式顺序排列。
async fn faq_list(State(pool): State<DBPool>) -> Result<Json<Vec<FaqItem>>> {
    let items = (&pool).faq_list().await?;
    Ok(Json(items))
}

/// DIY 项目列表，最新的在前。
async fn diy_list(
    Query(params): Query<ListParams>,
    State(pool): State<DBPool>,
) -> Result<Json<Vec<DiyProject>>> {
    let projects = (&pool).diy_list(params.limit()).await?;
    Ok(Json(projects))
}

/// 根据 id 获取单个 DIY 项目。
async fn diy_get(Path(id): Path<i64>, State(pool): State<DBPool>) -> Result<Json<DiyProject>> {
    let project = (&pool).diy_get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(project))
}

/// 实用链接列表，可按分类过滤；未知分类得到空列表。
async fn useful_links_list(
    Query(params): Query<ListParams>,
    State(pool): State<DBPool>,
) -> Result<Json<Vec<UsefulLink>>> {
    let links = (&pool)
        .useful_links_list(params.limit(), params.category.clone())
        .await?;
    Ok(Json(links))
}

/// 根据 id 获取单条实用链接。
async fn useful_links_get(
    Path(id): Path<i64>,
    State(pool): State<DBPool>,
) -> Result<Json<UsefulLink>> {
    let link = (&pool).useful_links_get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_rejects_non_positive_limit() {
        let params = ListParams {
            limit: Some(0),
            category: None,
        };
        assert_eq!(params.limit(), None);

        let params = ListParams {
            limit: Some(-3),
            category: None,
        };
        assert_eq!(params.limit(), None);

        let params = ListParams {
            limit: Some(5),
            category: None,
        };
        assert_eq!(params.limit(), Some(5));
    }
}
