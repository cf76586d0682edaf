use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use serde::Deserialize;

use crate::error::{ApiError, Error, Result};

/// 认证服务返回的会话用户
///
/// 本服务只读取这个对象，不管理凭证。`id` 是认证服务分配的文本 id。
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// 展示名：name 为空时退回 email
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    user: Option<AuthUser>,
}

/// AuthClient 将请求的 Cookie 转发给外部认证服务换取会话用户。
///
/// 认证服务暴露 `GET {base}/get-session`，返回 `{"user": {...}}` 或
/// `{"user": null}`。
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for AuthClient {
    /// 从环境变量 AUTH_API_URL 创建默认客户端
    ///
    /// - Panics
    ///
    /// 如果环境变量未设置，会 panic
    fn default() -> Self {
        Self::new(std::env::var("AUTH_API_URL").expect("AUTH_API_URL not set"))
    }
}

impl AuthClient {
    /// 使用指定的认证服务地址创建客户端
    ///
    /// ```ignore
    /// let auth = AuthClient::new("http://auth.internal/api/auth");
    /// // 使用环境变量
    /// let auth = AuthClient::default();
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 用请求携带的 Cookie 解析会话
    ///
    /// 无 Cookie、认证服务返回非 2xx 或会话不存在时返回 `None`。
    pub async fn get_session(
        &self,
        cookie: Option<&str>,
    ) -> core::result::Result<Option<AuthUser>, reqwest::Error> {
        let Some(cookie) = cookie else {
            return Ok(None);
        };

        let resp = self
            .client
            .get(format!("{}/get-session", self.base_url))
            .header(header::COOKIE, cookie)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Ok(None);
        }

        let session: Option<SessionResponse> = resp.json().await?;
        Ok(session.and_then(|s| s.user))
    }
}

fn cookie_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
}

/// 需要登录的路由守卫，无会话拒绝为 401
pub struct CurrentUser(pub AuthUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthClient: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let auth = AuthClient::from_ref(state);

        let user = auth
            .get_session(cookie_header(parts))
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}

/// 仅管理员的路由守卫：无会话 401，角色不符 403
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthClient: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(ApiError::Forbidden.into());
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = AuthUser {
            id: "u1".to_string(),
            name: String::new(),
            email: "user@example.com".to_string(),
            role: None,
        };
        assert_eq!(user.display_name(), "user@example.com");

        let user = AuthUser {
            name: "Alice".to_string(),
            ..user
        };
        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn test_is_admin_requires_admin_role() {
        let mut user = AuthUser {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "user@example.com".to_string(),
            role: None,
        };
        assert!(!user.is_admin());

        user.role = Some("user".to_string());
        assert!(!user.is_admin());

        user.role = Some("admin".to_string());
        assert!(user.is_admin());
    }

    #[test]
    fn test_session_response_parses_null_user() {
        let session: SessionResponse =
            serde_json::from_value(serde_json::json!({ "user": null })).expect("deserialize");
        assert!(session.user.is_none());

        let session: SessionResponse = serde_json::from_value(serde_json::json!({
            "user": { "id": "u1", "name": "Alice", "email": "a@example.com", "role": "admin" }
        }))
        .expect("deserialize");
        let user = session.user.expect("user present");
        assert!(user.is_admin());
    }
}
