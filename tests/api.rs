use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, Response, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use robohub::{
    api,
    auth::AuthClient,
    state::AppState,
    storage::{ContentStorage, init_db_from_env, migrate},
};

const ADMIN_COOKIE: &str = "session=admin-token";
const MEMBER_COOKIE: &str = "session=member-token";

/// 本地认证桩：按 Cookie 返回固定的会话用户
///
/// 管理员有 name 和 admin 角色；普通成员 name 为空，
/// 用于覆盖退回 email 的展示名逻辑。
async fn spawn_auth_stub() -> String {
    async fn get_session(headers: HeaderMap) -> Json<Value> {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let user = if cookie.contains("session=admin-token") {
            json!({
                "id": "u-admin",
                "name": "Admin",
                "email": "admin@example.com",
                "role": "admin"
            })
        } else if cookie.contains("session=member-token") {
            json!({
                "id": "u-member",
                "name": "",
                "email": "member@example.com",
                "role": "user"
            })
        } else {
            Value::Null
        };

        Json(json!({ "user": user }))
    }

    let router = Router::new().route("/get-session", get(get_session));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定认证桩失败");
    let addr = listener.local_addr().expect("读取认证桩地址失败");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("认证桩退出");
    });

    format!("http://{}", addr)
}

struct TestApp {
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let db = init_db_from_env().await;

        migrate(&db, "sql/01-CREATE_TABLE.sql")
            .await
            .expect("初始化sql失败");

        {
            let mut store = &db;
            store.reset_all().await.expect("清空内容表失败");
        }

        let auth = AuthClient::new(spawn_auth_stub().await);
        let app = AppState::new(db, auth);

        let router = api::setup_route(app);

        Self { router }
    }

    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("oneshot fail")
    }

    async fn get(&self, path: &str) -> Response<Body> {
        let req = Request::get(path).body(Body::empty()).expect("请求失败");
        self.request(req).await
    }

    async fn get_json(&self, path: &str, msg: &str) -> Value {
        let resp = self.get(path).await;
        assert_eq!(StatusCode::OK, resp.status(), "{}", msg);
        read_json(resp).await
    }

    async fn send_json(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
        body: &Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let req = builder
            .body(Body::new(body.to_string()))
            .expect("请求失败");
        self.request(req).await
    }

    async fn delete(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("DELETE").uri(path);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let req = builder.body(Body::empty()).expect("请求失败");
        self.request(req).await
    }
}

async fn read_json(resp: Response<Body>) -> Value {
    let data = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("读取数据失败");
    serde_json::from_slice(&data).expect("反序列化失败")
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("应为数组")
        .iter()
        .map(|v| v["id"].as_i64().expect("应有 id"))
        .collect()
}

#[tokio::test]
#[ignore = "API测试 依赖真实数据库"]
async fn test_api() {
    let app = TestApp::new().await;

    // 访问控制
    {
        let resp = app
            .send_json("POST", "/api/chat/messages", None, &json!({"message": "hi"}))
            .await;
        assert_eq!(StatusCode::UNAUTHORIZED, resp.status(), "无会话发消息");

        let draft = json!({"title": "t", "content": "c"});
        let resp = app.send_json("POST", "/api/admin/news", None, &draft).await;
        assert_eq!(StatusCode::UNAUTHORIZED, resp.status(), "无会话进管理端");

        let resp = app
            .send_json("POST", "/api/admin/news", Some(MEMBER_COOKIE), &draft)
            .await;
        assert_eq!(StatusCode::FORBIDDEN, resp.status(), "普通成员进管理端");
    }

    // 新闻 CRUD
    {
        let draft = json!({
            "title": "Atlas 新固件",
            "content": "正文",
            "summary": "摘要",
            "imageUrl": "https://example.com/atlas.png",
            "videoUrl": "",
            "sourceUrl": "https://example.com/src",
            "sourceName": "example"
        });

        let resp = app
            .send_json("POST", "/api/admin/news", Some(ADMIN_COOKIE), &draft)
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "创建新闻");
        let created = read_json(resp).await;

        let id = created["id"].as_i64().expect("创建应返回 id");
        assert_eq!(created["title"], draft["title"]);
        assert_eq!(created["summary"], draft["summary"]);
        // 空字符串字段落库为 NULL
        assert_eq!(created["videoUrl"], Value::Null);
        assert_eq!(created["isAutoGenerated"], json!(false));

        // 创建后按 id 取回，内容应与载荷一致
        let fetched = app.get_json(&format!("/api/news/{}", id), "按 id 取新闻").await;
        assert_eq!(fetched, created);

        // 再建 4 条，验证 limit 是完整列表的前缀
        for i in 0..4 {
            let draft = json!({"title": format!("news-{i}"), "content": "正文"});
            let resp = app
                .send_json("POST", "/api/admin/news", Some(ADMIN_COOKIE), &draft)
                .await;
            assert_eq!(StatusCode::OK, resp.status(), "批量创建新闻");
        }

        let full = app.get_json("/api/news", "全量新闻列表").await;
        let full_ids = ids(&full);
        assert_eq!(full_ids.len(), 5);
        // 最新的在前
        let mut sorted = full_ids.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(full_ids, sorted, "新闻应按发布时间倒序");

        let limited = app.get_json("/api/news?limit=3", "截断新闻列表").await;
        assert_eq!(ids(&limited), full_ids[..3].to_vec(), "limit 应取前缀");

        // 更新
        let updated_draft = json!({"title": "Atlas 新固件 v2", "content": "正文 v2"});
        let resp = app
            .send_json(
                "PUT",
                &format!("/api/admin/news/{}", id),
                Some(ADMIN_COOKIE),
                &updated_draft,
            )
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "更新新闻");
        let updated = read_json(resp).await;
        assert_eq!(updated["title"], "Atlas 新固件 v2");
        assert_eq!(updated["id"], json!(id));

        // 删除后取回应为 404
        let resp = app
            .delete(&format!("/api/admin/news/{}", id), Some(ADMIN_COOKIE))
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "删除新闻");

        let resp = app.get(&format!("/api/news/{}", id)).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status(), "删除后取回");

        let resp = app
            .send_json(
                "PUT",
                &format!("/api/admin/news/{}", id),
                Some(ADMIN_COOKIE),
                &updated_draft,
            )
            .await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status(), "更新已删除的 id");

        let resp = app
            .delete(&format!("/api/admin/news/{}", id), Some(ADMIN_COOKIE))
            .await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status(), "重复删除");
    }

    // 载荷校验
    {
        let resp = app
            .send_json(
                "POST",
                "/api/admin/news",
                Some(ADMIN_COOKIE),
                &json!({"title": "  ", "content": "c"}),
            )
            .await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status(), "标题为空白");
        let body = read_json(resp).await;
        assert!(body["error"].is_string(), "错误体应为 {{\"error\"}} 结构");

        // 缺字段走 Json 拒绝路径，同样是 400
        let resp = app
            .send_json(
                "POST",
                "/api/admin/news",
                Some(ADMIN_COOKIE),
                &json!({"title": "t"}),
            )
            .await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status(), "缺少 content");
    }

    // FAQ 按显式顺序
    {
        for (q, order) in [("q-second", 2), ("q-zero", 0), ("q-first", 1)] {
            let resp = app
                .send_json(
                    "POST",
                    "/api/admin/faq",
                    Some(ADMIN_COOKIE),
                    &json!({"question": q, "answer": "a", "order": order}),
                )
                .await;
            assert_eq!(StatusCode::OK, resp.status(), "创建 FAQ");
        }

        let list = app.get_json("/api/faq", "FAQ 列表").await;
        let orders: Vec<i64> = list
            .as_array()
            .expect("应为数组")
            .iter()
            .map(|v| v["order"].as_i64().expect("应有 order"))
            .collect();
        assert_eq!(orders, vec![0, 1, 2], "FAQ 应按 order 升序");
    }

    // 图鉴与 DIY
    {
        let resp = app
            .send_json(
                "POST",
                "/api/admin/robots",
                Some(ADMIN_COOKIE),
                &json!({
                    "name": "Unitree Go2",
                    "category": "四足",
                    "description": "四足机器人",
                    "price": "$1600"
                }),
            )
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "创建图鉴条目");
        let robot = read_json(resp).await;
        let robot_id = robot["id"].as_i64().expect("应有 id");

        let fetched = app
            .get_json(&format!("/api/robots/{}", robot_id), "按 id 取图鉴")
            .await;
        assert_eq!(fetched["price"], "$1600");

        let resp = app
            .send_json(
                "POST",
                "/api/admin/diy",
                Some(ADMIN_COOKIE),
                &json!({
                    "title": "循迹小车",
                    "description": "入门项目",
                    "difficulty": "easy"
                }),
            )
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "创建 DIY 项目");
        let project = read_json(resp).await;

        let list = app.get_json("/api/diy?limit=1", "DIY 列表").await;
        assert_eq!(ids(&list), vec![project["id"].as_i64().expect("应有 id")]);
    }

    // 实用链接的分类过滤与排序
    {
        for (title, category, order) in [
            ("B", "software", 0),
            ("C", "hardware", 0),
            ("A", "software", 1),
        ] {
            let resp = app
                .send_json(
                    "POST",
                    "/api/admin/useful-links",
                    Some(ADMIN_COOKIE),
                    &json!({
                        "title": title,
                        "description": "d",
                        "url": "https://example.com",
                        "category": category,
                        "order": order
                    }),
                )
                .await;
            assert_eq!(StatusCode::OK, resp.status(), "创建链接");
        }

        let software = app
            .get_json("/api/useful-links?category=software", "按分类过滤")
            .await;
        let titles: Vec<&str> = software
            .as_array()
            .expect("应为数组")
            .iter()
            .map(|v| v["title"].as_str().expect("应有 title"))
            .collect();
        assert_eq!(titles, vec!["B", "A"], "组内按 order 升序");

        let empty = app
            .get_json("/api/useful-links?category=nonexistent", "未知分类")
            .await;
        assert_eq!(empty.as_array().expect("应为数组").len(), 0, "未知分类应为空");
    }

    // 聊天流程
    {
        let resp = app
            .send_json(
                "POST",
                "/api/chat/messages",
                Some(MEMBER_COOKIE),
                &json!({"message": ""}),
            )
            .await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status(), "空消息");

        let resp = app
            .send_json(
                "POST",
                "/api/chat/messages",
                Some(MEMBER_COOKIE),
                &json!({"message": "x".repeat(1001)}),
            )
            .await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status(), "超长消息");

        let resp = app
            .send_json(
                "POST",
                "/api/chat/messages",
                Some(MEMBER_COOKIE),
                &json!({"message": "x"}),
            )
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "1 字符消息");
        let first = read_json(resp).await;
        // 成员 name 为空，展示名退回 email
        assert_eq!(first["userName"], "member@example.com");
        assert_eq!(first["isDeleted"], json!(false));

        let resp = app
            .send_json(
                "POST",
                "/api/chat/messages",
                Some(ADMIN_COOKIE),
                &json!({"message": "привет"}),
            )
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "管理员发消息");

        let list = app.get_json("/api/chat/messages", "聊天记录").await;
        let list_ids = ids(&list);
        assert_eq!(list_ids.len(), 2);
        // 旧的在前
        assert!(list_ids[0] < list_ids[1], "聊天记录应按时间升序");

        // 软删除后从列表消失
        let first_id = first["id"].as_i64().expect("应有 id");
        let resp = app
            .delete(
                &format!("/api/admin/chat/messages/{}", first_id),
                Some(MEMBER_COOKIE),
            )
            .await;
        assert_eq!(StatusCode::FORBIDDEN, resp.status(), "普通成员删消息");

        let resp = app
            .delete(
                &format!("/api/admin/chat/messages/{}", first_id),
                Some(ADMIN_COOKIE),
            )
            .await;
        assert_eq!(StatusCode::OK, resp.status(), "管理员软删除");

        let list = app.get_json("/api/chat/messages", "删除后的聊天记录").await;
        assert_eq!(ids(&list).len(), 1, "软删除的消息不应出现");
    }
}
