//! Articles, list queries and write payloads.

use serde::{Deserialize, Serialize};

use super::taxonomy::{Category, Tag};
use super::user::User;

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ArticleStatus {
    Draft,
    #[default]
    Published,
    Deleted,
}

impl From<u8> for ArticleStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => ArticleStatus::Draft,
            2 => ArticleStatus::Deleted,
            _ => ArticleStatus::Published,
        }
    }
}

impl From<ArticleStatus> for u8 {
    fn from(value: ArticleStatus) -> Self {
        match value {
            ArticleStatus::Draft => 0,
            ArticleStatus::Published => 1,
            ArticleStatus::Deleted => 2,
        }
    }
}

/// Article as it appears in list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub is_top: bool,
    #[serde(default)]
    pub is_recommend: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Full article including its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ArticleDetail {
    pub fn id(&self) -> u64 {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    pub fn like_count(&self) -> u64 {
        self.summary.like_count
    }
}

/// Result of toggling a like.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub message: String,
    pub is_liked: bool,
    pub like_count: u64,
}

/// Filters for the article list endpoint. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub keyword: Option<String>,
    pub category_id: Option<u64>,
    pub tag_id: Option<u64>,
    pub author_id: Option<u64>,
    pub is_recommend: Option<bool>,
    pub ordering: Option<String>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn tag(mut self, tag_id: u64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn author(mut self, author_id: u64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn recommended(mut self, is_recommend: bool) -> Self {
        self.is_recommend = Some(is_recommend);
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Query pairs in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            pairs.push(("keyword", keyword.to_string()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(id) = self.tag_id {
            pairs.push(("tag_id", id.to_string()));
        }
        if let Some(id) = self.author_id {
            pairs.push(("author_id", id.to_string()));
        }
        if let Some(flag) = self.is_recommend {
            pairs.push(("is_recommend", flag.to_string()));
        }
        if let Some(ordering) = self.ordering.as_deref().filter(|o| !o.is_empty()) {
            pairs.push(("ordering", ordering.to_string()));
        }
        pairs
    }
}

/// Body for creating an article. The backend echoes it back on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub is_top: bool,
    #[serde(default)]
    pub is_recommend: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_names: Vec<String>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Partial article update; only set fields are sent.
///
/// `tag_names: Some(vec![])` clears the tags, `None` leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_top: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recommend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_names: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_flattens_summary_fields() {
        let detail: ArticleDetail = serde_json::from_value(json!({
            "id": 5,
            "title": "Ownership",
            "content": "# Body",
            "like_count": 3,
            "author": {"id": 1, "username": "ada"},
            "category": {"id": 2, "name": "Rust"},
            "tags": [{"id": 9, "name": "memory", "color": "#f00", "use_count": 4}],
            "updated_at": "2024-05-01T12:30:00+08:00"
        }))
        .unwrap();

        assert_eq!(detail.id(), 5);
        assert_eq!(detail.like_count(), 3);
        assert_eq!(detail.content, "# Body");
        assert_eq!(detail.summary.tags[0].name, "memory");
        assert_eq!(detail.summary.author.as_ref().unwrap().username, "ada");
    }

    #[test]
    fn test_query_skips_unset_and_empty() {
        let query = ArticleQuery::new().page(2).keyword("").tag(7).ordering("-view_count");
        assert_eq!(
            query.to_query(),
            vec![
                ("page", "2".to_string()),
                ("tag_id", "7".to_string()),
                ("ordering", "-view_count".to_string()),
            ]
        );
        assert!(ArticleQuery::default().to_query().is_empty());
    }

    #[test]
    fn test_draft_serializes_status_as_number() {
        let mut draft = ArticleDraft::new("T", "C");
        draft.status = ArticleStatus::Draft;
        draft.tag_names = vec!["rust".to_string()];
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["status"], json!(0));
        assert_eq!(value["tag_names"], json!(["rust"]));
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_update_distinguishes_clear_from_untouched() {
        let untouched = serde_json::to_value(ArticleUpdate::default()).unwrap();
        assert_eq!(untouched, json!({}));

        let cleared = ArticleUpdate {
            tag_names: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(cleared).unwrap(), json!({"tag_names": []}));
    }
}
