//! Comments for the article being viewed.

use super::cell::StateCell;
use crate::api::ApiClient;
use crate::error::{ApiResult, ErrorContext, ResultExt};
use crate::models::{Comment, LikeResponse, ListPayload, NewComment};

const COMMENTS_PATH: &str = "/api/comments/";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentsState {
    /// Article whose comments are loaded.
    pub article_id: Option<u64>,
    /// Top-level comments, each with its replies.
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone)]
pub struct CommentsModule {
    api: ApiClient,
    state: StateCell<CommentsState>,
}

impl CommentsModule {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: StateCell::default(),
        }
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.read(|s| s.comments.clone())
    }

    pub fn article_id(&self) -> Option<u64> {
        self.state.read(|s| s.article_id)
    }

    /// Total including replies.
    pub fn total(&self) -> usize {
        self.state
            .read(|s| s.comments.iter().map(|c| 1 + c.replies.len()).sum())
    }

    pub async fn fetch_comments(&self, article_id: u64) -> ApiResult<Vec<Comment>> {
        let comments = self
            .api
            .get_json::<ListPayload<Comment>>(&format!("{}articles/{}/", COMMENTS_PATH, article_id))
            .await
            .with_context(|| ErrorContext::new("fetch_comments").with_module("comments"))?
            .into_vec();
        self.state.update(|s| {
            s.article_id = Some(article_id);
            s.comments = comments.clone();
        });
        Ok(comments)
    }

    /// Post a comment, or a reply when `parent` is set.
    pub async fn create_comment(
        &self,
        article_id: u64,
        content: &str,
        parent: Option<u64>,
    ) -> ApiResult<Comment> {
        let mut body = NewComment::new(article_id, content);
        if let Some(parent) = parent {
            body = body.reply_to(parent);
        }
        let created: Comment = self
            .api
            .post_json(
                &format!("{}articles/{}/create/", COMMENTS_PATH, article_id),
                &body,
            )
            .await
            .with_context(|| ErrorContext::new("create_comment").with_module("comments"))?;

        self.state.update(|s| {
            if s.article_id != Some(article_id) {
                return;
            }
            match created.parent {
                None => s.comments.insert(0, created.clone()),
                Some(parent_id) => {
                    if let Some(parent) = s.comments.iter_mut().find(|c| c.id == parent_id) {
                        parent.replies.push(created.clone());
                    }
                }
            }
        });
        Ok(created)
    }

    pub async fn delete_comment(&self, id: u64) -> ApiResult<()> {
        self.api
            .delete(&format!("{}{}/delete/", COMMENTS_PATH, id))
            .await
            .with_context(|| ErrorContext::new("delete_comment").with_module("comments"))?;
        self.state.update(|s| {
            s.comments.retain(|c| c.id != id);
            for comment in &mut s.comments {
                comment.replies.retain(|r| r.id != id);
            }
        });
        Ok(())
    }

    pub async fn like_comment(&self, id: u64) -> ApiResult<LikeResponse> {
        let response: LikeResponse = self
            .api
            .post_empty(&format!("{}{}/like/", COMMENTS_PATH, id))
            .await
            .with_context(|| ErrorContext::new("like_comment").with_module("comments"))?;
        self.state.update(|s| {
            if let Some(comment) = s.comments.iter_mut().find_map(|c| c.find_mut(id)) {
                comment.like_count = response.like_count;
                comment.is_liked = response.is_liked;
            }
        });
        Ok(response)
    }

    /// The signed-in user's comments across all articles. Not stored.
    pub async fn fetch_my_comments(&self) -> ApiResult<Vec<Comment>> {
        self.api
            .get_json::<ListPayload<Comment>>(&format!("{}my/", COMMENTS_PATH))
            .await
            .map(ListPayload::into_vec)
            .with_context(|| ErrorContext::new("fetch_my_comments").with_module("comments"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://test.local";

    fn url(path: &str) -> String {
        format!("{}{}", BASE, path)
    }

    fn module(mock: &MockHttpClient) -> CommentsModule {
        CommentsModule::new(ApiClient::new(BASE, Arc::new(mock.clone())))
    }

    fn loaded(mock: &MockHttpClient) -> serde_json::Value {
        let thread = json!({
            "count": 2,
            "results": [
                {"id": 1, "content": "first", "replies": [{"id": 3, "content": "re", "parent": 1}]},
                {"id": 2, "content": "second"}
            ]
        });
        mock.set_method_response(
            "GET",
            &url("/api/comments/articles/7/"),
            MockResponse::json(200, thread.clone()),
        );
        thread
    }

    #[tokio::test]
    async fn test_fetch_records_article() {
        let mock = MockHttpClient::new();
        loaded(&mock);
        let comments = module(&mock);

        comments.fetch_comments(7).await.unwrap();
        assert_eq!(comments.article_id(), Some(7));
        assert_eq!(comments.total(), 3);
    }

    #[tokio::test]
    async fn test_create_top_level_and_reply() {
        let mock = MockHttpClient::new();
        loaded(&mock);
        let comments = module(&mock);
        comments.fetch_comments(7).await.unwrap();

        mock.set_response(
            &url("/api/comments/articles/7/create/"),
            MockResponse::json(201, json!({"id": 10, "content": "new"})),
        );
        comments.create_comment(7, "new", None).await.unwrap();
        assert_eq!(comments.comments()[0].id, 10);

        mock.set_response(
            &url("/api/comments/articles/7/create/"),
            MockResponse::json(201, json!({"id": 11, "content": "reply", "parent": 2})),
        );
        comments.create_comment(7, "reply", Some(2)).await.unwrap();

        let body = mock.requests_to(&url("/api/comments/articles/7/create/"))[1].json_body();
        assert_eq!(body, Some(json!({"article": 7, "content": "reply", "parent": 2})));
        let second = comments.comments().into_iter().find(|c| c.id == 2).unwrap();
        assert_eq!(second.replies[0].id, 11);
    }

    #[tokio::test]
    async fn test_delete_removes_reply() {
        let mock = MockHttpClient::new();
        loaded(&mock);
        mock.set_method_response(
            "DELETE",
            &url("/api/comments/3/delete/"),
            MockResponse::Success(crate::traits::Response::new(204, bytes::Bytes::new())),
        );
        let comments = module(&mock);
        comments.fetch_comments(7).await.unwrap();

        comments.delete_comment(3).await.unwrap();
        assert_eq!(comments.total(), 2);
        assert!(comments.comments()[0].replies.is_empty());
    }

    #[tokio::test]
    async fn test_like_patches_reply_in_place() {
        let mock = MockHttpClient::new();
        loaded(&mock);
        mock.set_response(
            &url("/api/comments/3/like/"),
            MockResponse::json(200, json!({"message": "ok", "is_liked": true, "like_count": 4})),
        );
        let comments = module(&mock);
        comments.fetch_comments(7).await.unwrap();

        comments.like_comment(3).await.unwrap();
        let reply = &comments.comments()[0].replies[0];
        assert_eq!(reply.like_count, 4);
        assert!(reply.is_liked);
    }
}
