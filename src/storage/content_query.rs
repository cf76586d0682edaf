use super::{ChatMessage, DBPool, DiyProject, FaqItem, NewsArticle, RobotCatalogEntry, UsefulLink};

/// 聊天记录单次返回的最大条数
const CHAT_HISTORY_LIMIT: i64 = 100;

/// Trait 用于查询各内容集合
///
/// 提供新闻、图鉴、FAQ、DIY、聊天和实用链接的只读接口。
/// `limit` 在排序之后截断，缺省返回全量。
pub trait ContentQuery {
    /// 获取 [`DBPool`] 对象
    fn db(&self) -> &DBPool;

    /// 新闻列表，按发布时间倒序
    fn news_list(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<NewsArticle>, sqlx::Error>> {
        async move {
            let mut builder = sqlx::QueryBuilder::new(
                "SELECT * FROM news_articles ORDER BY published_at DESC",
            );
            if let Some(limit) = limit {
                builder.push(" LIMIT ").push_bind(limit);
            }

            builder
                .build_query_as::<NewsArticle>()
                .fetch_all(self.db())
                .await
        }
    }

    /// 查询单条新闻，不存在返回 `None`
    fn news_get(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<NewsArticle>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, NewsArticle>("SELECT * FROM news_articles WHERE id = $1")
                .bind(id)
                .fetch_optional(self.db())
                .await
        }
    }

    /// 图鉴列表，按创建时间倒序
    fn robots_list(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<RobotCatalogEntry>, sqlx::Error>> {
        async move {
            let mut builder =
                sqlx::QueryBuilder::new("SELECT * FROM robot_catalog ORDER BY created_at DESC");
            if let Some(limit) = limit {
                builder.push(" LIMIT ").push_bind(limit);
            }

            builder
                .build_query_as::<RobotCatalogEntry>()
                .fetch_all(self.db())
                .await
        }
    }

    /// 查询单条图鉴，不存在返回 `None`
    fn robots_get(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<RobotCatalogEntry>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, RobotCatalogEntry>("SELECT * FROM robot_catalog WHERE id = $1")
                .bind(id)
                .fetch_optional(self.db())
                .await
        }
    }

    /// FAQ 列表，按 sort_order 升序
    fn faq_list(&self) -> impl Future<Output = Result<Vec<FaqItem>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, FaqItem>("SELECT * FROM faq_items ORDER BY sort_order ASC")
                .fetch_all(self.db())
                .await
        }
    }

    /// DIY 项目列表，按创建时间倒序
    fn diy_list(
        &self,
        limit: Option<i64>,
    ) -> impl Future<Output = Result<Vec<DiyProject>, sqlx::Error>> {
        async move {
            let mut builder =
                sqlx::QueryBuilder::new("SELECT * FROM diy_projects ORDER BY created_at DESC");
            if let Some(limit) = limit {
                builder.push(" LIMIT ").push_bind(limit);
            }

            builder
                .build_query_as::<DiyProject>()
                .fetch_all(self.db())
                .await
        }
    }

    /// 查询单条 DIY 项目，不存在返回 `None`
    fn diy_get(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<DiyProject>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, DiyProject>("SELECT * FROM diy_projects WHERE id = $1")
                .bind(id)
                .fetch_optional(self.db())
                .await
        }
    }

    /// 聊天记录：未删除的消息按时间升序，最多 [`CHAT_HISTORY_LIMIT`] 条
    fn chat_messages(&self) -> impl Future<Output = Result<Vec<ChatMessage>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, ChatMessage>(
                "
                SELECT * FROM chat_messages
                WHERE is_deleted = FALSE
                ORDER BY created_at ASC
                LIMIT $1
                ",
            )
            .bind(CHAT_HISTORY_LIMIT)
            .fetch_all(self.db())
            .await
        }
    }

    /// 实用链接列表，可按分类过滤
    ///
    /// 未知分类返回空列表而不是错误。
    fn useful_links_list(
        &self,
        limit: Option<i64>,
        category: Option<String>,
    ) -> impl Future<Output = Result<Vec<UsefulLink>, sqlx::Error>> {
        async move {
            let mut builder = sqlx::QueryBuilder::new("SELECT * FROM useful_links ");

            if let Some(category) = category {
                builder.push("WHERE category = ").push_bind(category);
            }

            builder.push(" ORDER BY sort_order ASC, created_at DESC");
            if let Some(limit) = limit {
                builder.push(" LIMIT ").push_bind(limit);
            }

            builder
                .build_query_as::<UsefulLink>()
                .fetch_all(self.db())
                .await
        }
    }

    /// 查询单条实用链接，不存在返回 `None`
    fn useful_links_get(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<UsefulLink>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, UsefulLink>("SELECT * FROM useful_links WHERE id = $1")
                .bind(id)
                .fetch_optional(self.db())
                .await
        }
    }
}

impl ContentQuery for &DBPool {
    fn db(&self) -> &DBPool {
        self
    }
}
