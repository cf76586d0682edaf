use axum::extract::FromRef;

use crate::{auth::AuthClient, storage::DBPool};

/// 应用程序上下文
///
/// [`AppState`] 封装了数据库连接池和认证服务客户端，提供统一访问入口。
#[derive(Clone, FromRef)]
pub struct AppState {
    pool: DBPool,
    auth: AuthClient,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(pool: DBPool, auth: AuthClient) -> Self {
        Self { pool, auth }
    }
}
