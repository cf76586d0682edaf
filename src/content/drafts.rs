use serde::Deserialize;

use crate::error::ApiError;

/// 聊天消息允许的最大字符数
const CHAT_MESSAGE_MAX_CHARS: usize = 1000;

/// 校验必填字符串字段非空
fn require(value: &str, field: &'static str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// 可选字段规整：空字符串视为未填，存为 NULL
///
/// 管理端表单会把没动过的输入框提交成 ""。
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 新闻写入载荷
///
/// `title` 与 `content` 必填，其余可选。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
}

impl NewsDraft {
    pub fn validated(mut self) -> Result<Self, ApiError> {
        require(&self.title, "title")?;
        require(&self.content, "content")?;

        self.summary = normalize(self.summary);
        self.image_url = normalize(self.image_url);
        self.video_url = normalize(self.video_url);
        self.source_url = normalize(self.source_url);
        self.source_name = normalize(self.source_name);
        Ok(self)
    }
}

/// 图鉴条目写入载荷
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub official_website: Option<String>,
}

impl RobotDraft {
    pub fn validated(mut self) -> Result<Self, ApiError> {
        require(&self.name, "name")?;
        require(&self.category, "category")?;
        require(&self.description, "description")?;

        self.image_url = normalize(self.image_url);
        self.price = normalize(self.price);
        self.official_website = normalize(self.official_website);
        Ok(self)
    }
}

/// FAQ 条目写入载荷
#[derive(Debug, Deserialize)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    #[serde(rename = "order", default)]
    pub sort_order: i32,
}

impl FaqDraft {
    pub fn validated(self) -> Result<Self, ApiError> {
        require(&self.question, "question")?;
        require(&self.answer, "answer")?;
        Ok(self)
    }
}

/// DIY 项目写入载荷
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiyDraft {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl DiyDraft {
    pub fn validated(mut self) -> Result<Self, ApiError> {
        require(&self.title, "title")?;
        require(&self.description, "description")?;
        require(&self.difficulty, "difficulty")?;

        self.image_url = normalize(self.image_url);
        Ok(self)
    }
}

/// 实用链接写入载荷
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDraft {
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(rename = "order", default)]
    pub sort_order: i32,
}

impl LinkDraft {
    pub fn validated(mut self) -> Result<Self, ApiError> {
        require(&self.title, "title")?;
        require(&self.description, "description")?;
        require(&self.url, "url")?;
        require(&self.category, "category")?;

        self.icon_url = normalize(self.icon_url);
        Ok(self)
    }
}

/// 聊天消息写入载荷
///
/// 长度按原始字符计，不做 trim，1 到 1000 个字符。
#[derive(Debug, Deserialize)]
pub struct ChatMessageDraft {
    pub message: String,
}

impl ChatMessageDraft {
    pub fn validated(self) -> Result<Self, ApiError> {
        let chars = self.message.chars().count();

        if chars == 0 {
            return Err(ApiError::Validation("message must not be empty".into()));
        }
        if chars > CHAT_MESSAGE_MAX_CHARS {
            return Err(ApiError::Validation(format!(
                "message must be at most {CHAT_MESSAGE_MAX_CHARS} characters"
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_length_bounds() {
        // 空消息拒绝
        let draft = ChatMessageDraft {
            message: String::new(),
        };
        assert!(draft.validated().is_err());

        // 1 个字符通过
        let draft = ChatMessageDraft {
            message: "a".to_string(),
        };
        assert!(draft.validated().is_ok());

        // 恰好 1000 个字符通过
        let draft = ChatMessageDraft {
            message: "x".repeat(1000),
        };
        assert!(draft.validated().is_ok());

        // 1001 个字符拒绝
        let draft = ChatMessageDraft {
            message: "x".repeat(1001),
        };
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_chat_message_counts_chars_not_bytes() {
        // 1000 个多字节字符也应通过
        let draft = ChatMessageDraft {
            message: "é".repeat(1000),
        };
        assert!(draft.validated().is_ok());
    }

    #[test]
    fn test_news_draft_requires_title_and_content() {
        let draft = NewsDraft {
            title: "  ".to_string(),
            content: "text".to_string(),
            summary: None,
            image_url: None,
            video_url: None,
            source_url: None,
            source_name: None,
        };
        assert!(draft.validated().is_err());

        let draft = NewsDraft {
            title: "Title".to_string(),
            content: "text".to_string(),
            summary: Some("".to_string()),
            image_url: Some("https://example.com/a.png".to_string()),
            video_url: None,
            source_url: None,
            source_name: None,
        };
        let draft = draft.validated().expect("valid draft");

        // 空字符串规整为 None
        assert_eq!(draft.summary, None);
        assert_eq!(draft.image_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_link_draft_defaults_order() {
        let draft: LinkDraft = serde_json::from_value(serde_json::json!({
            "title": "ROS",
            "description": "Robot Operating System",
            "url": "https://ros.org",
            "category": "software"
        }))
        .expect("deserialize");

        assert_eq!(draft.sort_order, 0);
        assert!(draft.validated().is_ok());
    }

    #[test]
    fn test_faq_draft_order_field_name() {
        // 线上字段名为 order，落库列为 sort_order
        let draft: FaqDraft = serde_json::from_value(serde_json::json!({
            "question": "Q",
            "answer": "A",
            "order": 7
        }))
        .expect("deserialize");

        assert_eq!(draft.sort_order, 7);
    }
}
