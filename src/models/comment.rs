//! Article comments.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Article reference attached to comments in "my comments" listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentArticleRef {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

/// A comment. Top-level comments carry their replies; replies carry none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub article: Option<CommentArticleRef>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }

    /// Find this comment or one of its replies by id.
    pub fn find_mut(&mut self, id: u64) -> Option<&mut Comment> {
        if self.id == id {
            return Some(self);
        }
        self.replies.iter_mut().find(|reply| reply.id == id)
    }
}

/// Body for posting a comment or a reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub article: u64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
}

impl NewComment {
    pub fn new(article: u64, content: impl Into<String>) -> Self {
        Self {
            article,
            content: content.into(),
            parent: None,
        }
    }

    pub fn reply_to(mut self, parent: u64) -> Self {
        self.parent = Some(parent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn thread() -> Comment {
        serde_json::from_value(json!({
            "id": 1,
            "content": "first",
            "replies": [
                {"id": 2, "content": "reply", "parent": 1},
                {"id": 3, "content": "another", "parent": 1}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_mut_searches_replies() {
        let mut comment = thread();
        assert!(!comment.is_reply());
        comment.find_mut(3).unwrap().like_count = 8;
        assert_eq!(comment.replies[1].like_count, 8);
        assert!(comment.find_mut(99).is_none());
    }

    #[test]
    fn test_new_comment_body() {
        let body = NewComment::new(5, "nice").reply_to(1);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"article": 5, "content": "nice", "parent": 1})
        );
        let top = NewComment::new(5, "nice");
        assert!(serde_json::to_value(&top).unwrap().get("parent").is_none());
    }
}
