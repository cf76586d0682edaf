use sqlx::PgExecutor;

use crate::content::{ChatMessageDraft, DiyDraft, FaqDraft, LinkDraft, NewsDraft, RobotDraft};

use super::{ChatMessage, DiyProject, FaqItem, NewsArticle, RobotCatalogEntry, UsefulLink};

/// 提供各内容集合的写入接口
///
/// 每个操作只写一行；时间戳由数据库在插入时分配。
/// 更新和删除在 id 不存在时返回 `None` / `false`，由调用方映射为 404。
pub trait ContentStorage {
    /// 获取 SQL 执行器，用于 [`sqlx::query()`] 执行
    fn executor<'t>(&'t mut self) -> impl PgExecutor<'t>;

    /// 清空所有内容表，测试用
    fn reset_all(&mut self) -> impl Future<Output = Result<(), sqlx::Error>> {
        async {
            sqlx::query(
                "
                TRUNCATE TABLE
                    news_articles, robot_catalog, faq_items,
                    diy_projects, chat_messages, useful_links
                RESTART IDENTITY
                ",
            )
            .execute(self.executor())
            .await?;
            Ok(())
        }
    }

    /// 插入新闻，返回带 id 和发布时间的完整行
    fn insert_news(
        &mut self,
        draft: &NewsDraft,
    ) -> impl Future<Output = Result<NewsArticle, sqlx::Error>> {
        async {
            sqlx::query_as::<_, NewsArticle>(
                "
                INSERT INTO news_articles
                    (title, content, summary, image_url, video_url, source_url, source_name)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                ",
            )
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&draft.summary)
            .bind(&draft.image_url)
            .bind(&draft.video_url)
            .bind(&draft.source_url)
            .bind(&draft.source_name)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 覆盖新闻的可变字段，id 不存在返回 `None`
    fn update_news(
        &mut self,
        id: i64,
        draft: &NewsDraft,
    ) -> impl Future<Output = Result<Option<NewsArticle>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, NewsArticle>(
                "
                UPDATE news_articles
                SET title = $2, content = $3, summary = $4, image_url = $5,
                    video_url = $6, source_url = $7, source_name = $8
                WHERE id = $1
                RETURNING *
                ",
            )
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&draft.summary)
            .bind(&draft.image_url)
            .bind(&draft.video_url)
            .bind(&draft.source_url)
            .bind(&draft.source_name)
            .fetch_optional(self.executor())
            .await
        }
    }

    /// 删除新闻，返回是否确有此行
    fn delete_news(&mut self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> {
        async move {
            let deleted = sqlx::query("DELETE FROM news_articles WHERE id = $1")
                .bind(id)
                .execute(self.executor())
                .await?;
            Ok(deleted.rows_affected() > 0)
        }
    }

    /// 插入图鉴条目
    fn insert_robot(
        &mut self,
        draft: &RobotDraft,
    ) -> impl Future<Output = Result<RobotCatalogEntry, sqlx::Error>> {
        async {
            sqlx::query_as::<_, RobotCatalogEntry>(
                "
                INSERT INTO robot_catalog
                    (name, category, description, image_url, price, official_website)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                ",
            )
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .bind(&draft.price)
            .bind(&draft.official_website)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 覆盖图鉴条目的可变字段
    fn update_robot(
        &mut self,
        id: i64,
        draft: &RobotDraft,
    ) -> impl Future<Output = Result<Option<RobotCatalogEntry>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, RobotCatalogEntry>(
                "
                UPDATE robot_catalog
                SET name = $2, category = $3, description = $4,
                    image_url = $5, price = $6, official_website = $7
                WHERE id = $1
                RETURNING *
                ",
            )
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(&draft.description)
            .bind(&draft.image_url)
            .bind(&draft.price)
            .bind(&draft.official_website)
            .fetch_optional(self.executor())
            .await
        }
    }

    /// 删除图鉴条目
    fn delete_robot(&mut self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> {
        async move {
            let deleted = sqlx::query("DELETE FROM robot_catalog WHERE id = $1")
                .bind(id)
                .execute(self.executor())
                .await?;
            Ok(deleted.rows_affected() > 0)
        }
    }

    /// 插入 FAQ 条目
    fn insert_faq(
        &mut self,
        draft: &FaqDraft,
    ) -> impl Future<Output = Result<FaqItem, sqlx::Error>> {
        async {
            sqlx::query_as::<_, FaqItem>(
                "
                INSERT INTO faq_items (question, answer, sort_order)
                VALUES ($1, $2, $3)
                RETURNING *
                ",
            )
            .bind(&draft.question)
            .bind(&draft.answer)
            .bind(draft.sort_order)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 覆盖 FAQ 条目
    fn update_faq(
        &mut self,
        id: i64,
        draft: &FaqDraft,
    ) -> impl Future<Output = Result<Option<FaqItem>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, FaqItem>(
                "
                UPDATE faq_items
                SET question = $2, answer = $3, sort_order = $4
                WHERE id = $1
                RETURNING *
                ",
            )
            .bind(id)
            .bind(&draft.question)
            .bind(&draft.answer)
            .bind(draft.sort_order)
            .fetch_optional(self.executor())
            .await
        }
    }

    /// 删除 FAQ 条目
    fn delete_faq(&mut self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> {
        async move {
            let deleted = sqlx::query("DELETE FROM faq_items WHERE id = $1")
                .bind(id)
                .execute(self.executor())
                .await?;
            Ok(deleted.rows_affected() > 0)
        }
    }

    /// 插入 DIY 项目
    fn insert_diy(
        &mut self,
        draft: &DiyDraft,
    ) -> impl Future<Output = Result<DiyProject, sqlx::Error>> {
        async {
            sqlx::query_as::<_, DiyProject>(
                "
                INSERT INTO diy_projects (title, description, difficulty, image_url)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                ",
            )
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.difficulty)
            .bind(&draft.image_url)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 覆盖 DIY 项目
    fn update_diy(
        &mut self,
        id: i64,
        draft: &DiyDraft,
    ) -> impl Future<Output = Result<Option<DiyProject>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, DiyProject>(
                "
                UPDATE diy_projects
                SET title = $2, description = $3, difficulty = $4, image_url = $5
                WHERE id = $1
                RETURNING *
                ",
            )
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.difficulty)
            .bind(&draft.image_url)
            .fetch_optional(self.executor())
            .await
        }
    }

    /// 删除 DIY 项目
    fn delete_diy(&mut self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> {
        async move {
            let deleted = sqlx::query("DELETE FROM diy_projects WHERE id = $1")
                .bind(id)
                .execute(self.executor())
                .await?;
            Ok(deleted.rows_affected() > 0)
        }
    }

    /// 追加聊天消息
    ///
    /// `user_id` 和 `user_name` 取自会话用户，消息本身已通过长度校验。
    fn insert_chat_message(
        &mut self,
        user_id: &str,
        user_name: &str,
        draft: &ChatMessageDraft,
    ) -> impl Future<Output = Result<ChatMessage, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, ChatMessage>(
                "
                INSERT INTO chat_messages (user_id, user_name, message)
                VALUES ($1, $2, $3)
                RETURNING *
                ",
            )
            .bind(user_id)
            .bind(user_name)
            .bind(&draft.message)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 软删除聊天消息：只置位，不回退
    fn soft_delete_chat_message(
        &mut self,
        id: i64,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> {
        async move {
            let updated = sqlx::query("UPDATE chat_messages SET is_deleted = TRUE WHERE id = $1")
                .bind(id)
                .execute(self.executor())
                .await?;
            Ok(updated.rows_affected() > 0)
        }
    }

    /// 插入实用链接
    fn insert_link(
        &mut self,
        draft: &LinkDraft,
    ) -> impl Future<Output = Result<UsefulLink, sqlx::Error>> {
        async {
            sqlx::query_as::<_, UsefulLink>(
                "
                INSERT INTO useful_links
                    (title, description, url, category, icon_url, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                ",
            )
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.url)
            .bind(&draft.category)
            .bind(&draft.icon_url)
            .bind(draft.sort_order)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 覆盖实用链接，同时刷新 updated_at
    fn update_link(
        &mut self,
        id: i64,
        draft: &LinkDraft,
    ) -> impl Future<Output = Result<Option<UsefulLink>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, UsefulLink>(
                "
                UPDATE useful_links
                SET title = $2, description = $3, url = $4, category = $5,
                    icon_url = $6, sort_order = $7, updated_at = NOW()
                WHERE id = $1
                RETURNING *
                ",
            )
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.url)
            .bind(&draft.category)
            .bind(&draft.icon_url)
            .bind(draft.sort_order)
            .fetch_optional(self.executor())
            .await
        }
    }

    /// 删除实用链接
    fn delete_link(&mut self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> {
        async move {
            let deleted = sqlx::query("DELETE FROM useful_links WHERE id = $1")
                .bind(id)
                .execute(self.executor())
                .await?;
            Ok(deleted.rows_affected() > 0)
        }
    }
}

use super::DBPool;

/// 为 [`DBPool`] 实现 [`ContentStorage`]
impl ContentStorage for &'_ DBPool {
    fn executor<'t>(&'t mut self) -> impl PgExecutor<'t> {
        *self
    }
}
