//! Articles, taxonomy and pagination.

use tokio::sync::watch;

use super::cell::StateCell;
use crate::api::ApiClient;
use crate::error::{ApiResult, ErrorContext, ResultExt};
use crate::models::{
    ArticleDetail, ArticleDraft, ArticleQuery, ArticleSummary, ArticleUpdate, Category,
    LikeResponse, ListPayload, Page, Tag,
};

const ARTICLES_PATH: &str = "/api/blog/articles/";
const CREATE_PATH: &str = "/api/blog/articles/create/";
const RECOMMEND_PATH: &str = "/api/blog/articles/recommend/";
const HOT_PATH: &str = "/api/blog/articles/hot/";
const MY_ARTICLES_PATH: &str = "/api/blog/articles/my/";
const CATEGORIES_PATH: &str = "/api/blog/categories/";
const TAGS_PATH: &str = "/api/blog/tags/";

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            current: 1,
            page_size,
            total: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogState {
    pub articles: Vec<ArticleSummary>,
    pub current_article: Option<ArticleDetail>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub pagination: Pagination,
    /// Actions currently waiting on the network.
    pub in_flight: usize,
}

impl BlogState {
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Marks the module busy until dropped. Both edges notify subscribers.
struct LoadingGuard {
    state: StateCell<BlogState>,
}

impl LoadingGuard {
    fn new(state: &StateCell<BlogState>) -> Self {
        state.update(|s| s.in_flight += 1);
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.update(|s| s.in_flight -= 1);
    }
}

#[derive(Debug, Clone)]
pub struct BlogModule {
    api: ApiClient,
    state: StateCell<BlogState>,
}

impl BlogModule {
    pub fn new(api: ApiClient) -> Self {
        Self::with_page_size(api, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(api: ApiClient, page_size: u32) -> Self {
        let state = BlogState {
            pagination: Pagination::with_page_size(page_size),
            ..Default::default()
        };
        Self {
            api,
            state: StateCell::new(state),
        }
    }

    // Selectors

    pub fn articles(&self) -> Vec<ArticleSummary> {
        self.state.read(|s| s.articles.clone())
    }

    pub fn current_article(&self) -> Option<ArticleDetail> {
        self.state.read(|s| s.current_article.clone())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.read(|s| s.categories.clone())
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.state.read(|s| s.tags.clone())
    }

    pub fn pagination(&self) -> Pagination {
        self.state.read(|s| s.pagination)
    }

    pub fn loading(&self) -> bool {
        self.state.read(BlogState::loading)
    }

    pub fn snapshot(&self) -> BlogState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<BlogState> {
        self.state.subscribe()
    }

    fn busy(&self) -> LoadingGuard {
        LoadingGuard::new(&self.state)
    }

    // Actions

    /// Load one page of articles, replacing the list.
    ///
    /// The module's page size is sent when the query has none.
    pub async fn fetch_articles(&self, params: &ArticleQuery) -> ApiResult<Page<ArticleSummary>> {
        let _busy = self.busy();

        let mut query = params.clone();
        if query.page_size.is_none() {
            query.page_size = Some(self.pagination().page_size);
        }

        let page: Page<ArticleSummary> = self
            .api
            .get_json_with_query(ARTICLES_PATH, query.to_query())
            .await
            .with_context(|| ErrorContext::new("fetch_articles").with_module("blog"))?;

        let current = params.page.unwrap_or(1);
        self.state.update(|s| {
            s.articles = page.results.clone();
            s.pagination.total = page.count;
            s.pagination.current = current;
            if let Some(size) = params.page_size {
                s.pagination.page_size = size;
            }
        });
        tracing::debug!(count = page.count, page = current, "Articles loaded");
        Ok(page)
    }

    pub async fn fetch_article_detail(&self, id: u64) -> ApiResult<ArticleDetail> {
        let _busy = self.busy();
        let detail: ArticleDetail = self
            .api
            .get_json(&format!("{}{}/", ARTICLES_PATH, id))
            .await
            .with_context(|| ErrorContext::new("fetch_article_detail").with_module("blog"))?;
        self.state.update(|s| s.current_article = Some(detail.clone()));
        Ok(detail)
    }

    pub async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        let _busy = self.busy();
        let categories = self
            .api
            .get_json::<ListPayload<Category>>(CATEGORIES_PATH)
            .await
            .with_context(|| ErrorContext::new("fetch_categories").with_module("blog"))?
            .into_vec();
        self.state.update(|s| s.categories = categories.clone());
        Ok(categories)
    }

    pub async fn fetch_tags(&self) -> ApiResult<Vec<Tag>> {
        let _busy = self.busy();
        let tags = self
            .api
            .get_json::<ListPayload<Tag>>(TAGS_PATH)
            .await
            .with_context(|| ErrorContext::new("fetch_tags").with_module("blog"))?
            .into_vec();
        self.state.update(|s| s.tags = tags.clone());
        Ok(tags)
    }

    /// Create an article. The backend echoes the accepted fields.
    pub async fn create_article(&self, data: &ArticleDraft) -> ApiResult<ArticleDraft> {
        let _busy = self.busy();
        self.api
            .post_json(CREATE_PATH, data)
            .await
            .with_context(|| ErrorContext::new("create_article").with_module("blog"))
    }

    /// Apply a partial update. Returns the backend's echo of the written fields.
    pub async fn update_article(
        &self,
        id: u64,
        data: &ArticleUpdate,
    ) -> ApiResult<serde_json::Value> {
        let _busy = self.busy();
        self.api
            .patch_json(&format!("{}{}/update/", ARTICLES_PATH, id), data)
            .await
            .with_context(|| ErrorContext::new("update_article").with_module("blog"))
    }

    pub async fn delete_article(&self, id: u64) -> ApiResult<()> {
        let _busy = self.busy();
        self.api
            .delete(&format!("{}{}/delete/", ARTICLES_PATH, id))
            .await
            .with_context(|| ErrorContext::new("delete_article").with_module("blog"))
    }

    /// Toggle a like and patch the new count into the list entry and the
    /// current article when their id matches.
    pub async fn like_article(&self, id: u64) -> ApiResult<LikeResponse> {
        let _busy = self.busy();
        let response: LikeResponse = self
            .api
            .post_empty(&format!("{}{}/like/", ARTICLES_PATH, id))
            .await
            .with_context(|| ErrorContext::new("like_article").with_module("blog"))?;

        let like_count = response.like_count;
        self.state.update(|s| {
            if let Some(article) = s.articles.iter_mut().find(|a| a.id == id) {
                article.like_count = like_count;
            }
            if let Some(current) = s.current_article.as_mut().filter(|c| c.id() == id) {
                current.summary.like_count = like_count;
            }
        });
        Ok(response)
    }

    pub async fn fetch_recommend_articles(&self) -> ApiResult<Vec<ArticleSummary>> {
        let _busy = self.busy();
        self.api
            .get_json::<ListPayload<ArticleSummary>>(RECOMMEND_PATH)
            .await
            .map(ListPayload::into_vec)
            .with_context(|| ErrorContext::new("fetch_recommend_articles").with_module("blog"))
    }

    pub async fn fetch_hot_articles(&self) -> ApiResult<Vec<ArticleSummary>> {
        let _busy = self.busy();
        self.api
            .get_json::<ListPayload<ArticleSummary>>(HOT_PATH)
            .await
            .map(ListPayload::into_vec)
            .with_context(|| ErrorContext::new("fetch_hot_articles").with_module("blog"))
    }

    /// The signed-in author's articles, drafts included. Not stored.
    pub async fn fetch_my_articles(&self, page: u32) -> ApiResult<Page<ArticleSummary>> {
        let _busy = self.busy();
        let query = vec![
            ("page", page.to_string()),
            ("page_size", self.pagination().page_size.to_string()),
        ];
        self.api
            .get_json_with_query(MY_ARTICLES_PATH, query)
            .await
            .with_context(|| ErrorContext::new("fetch_my_articles").with_module("blog"))
    }
}
