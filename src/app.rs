//! Application bootstrap: one transport, one cookie jar, one session, shared
//! by every module.

use std::sync::Arc;

use crate::adapters::{FileCookieStore, MemoryCookieStore, ReqwestHttpClient};
use crate::api::{
    ApiClient, CaptureCookiesMiddleware, CookieHeaderMiddleware, CsrfTokenMiddleware,
    RequestedWithMiddleware, UnauthorizedMiddleware,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::User;
use crate::router::{NavigationGuard, Navigator, Router};
use crate::state::{
    AdminModule, BlogModule, CommentsModule, SessionContext, SiteModule, UserModule,
};
use crate::traits::{CookieStore, HttpClient};

/// Build an [`ApiClient`] with the standard middleware chain.
///
/// Request: CSRF token, XHR marker, cookie replay.
/// Response: cookie capture, then 401 handling.
pub fn standard_client(
    base_url: &str,
    http: Arc<dyn HttpClient>,
    cookies: Arc<dyn CookieStore>,
    session: SessionContext,
    navigator: Navigator,
) -> ApiClient {
    ApiClient::new(base_url, http)
        .with_request_middleware(Arc::new(CsrfTokenMiddleware::new(Arc::clone(&cookies))))
        .with_request_middleware(Arc::new(RequestedWithMiddleware))
        .with_request_middleware(Arc::new(CookieHeaderMiddleware::new(Arc::clone(&cookies))))
        .with_response_middleware(Arc::new(CaptureCookiesMiddleware::new(cookies)))
        .with_response_middleware(Arc::new(UnauthorizedMiddleware::new(session, navigator)))
}

/// Everything a front end needs, wired together.
#[derive(Clone)]
pub struct BlogApp {
    config: ClientConfig,
    api: ApiClient,
    cookies: Arc<dyn CookieStore>,
    session: SessionContext,
    pub user: UserModule,
    pub blog: BlogModule,
    pub site: SiteModule,
    pub comments: CommentsModule,
    pub admin: AdminModule,
    pub router: Router,
}

impl std::fmt::Debug for BlogApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogApp")
            .field("config", &self.config)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl BlogApp {
    /// Production wiring: reqwest transport and a file or memory cookie jar.
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        let http = ReqwestHttpClient::with_timeout(config.timeout).map_err(|e| ApiError::Config {
            message: format!("cannot build HTTP client: {}", e),
        })?;
        let cookies: Arc<dyn CookieStore> = match &config.cookie_file {
            Some(path) => Arc::new(FileCookieStore::with_path(path)),
            None => Arc::new(MemoryCookieStore::new()),
        };
        Ok(Self::with_parts(config, Arc::new(http), cookies))
    }

    /// Wire an application around the given transport and cookie store.
    pub fn with_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        cookies: Arc<dyn CookieStore>,
    ) -> Self {
        let session = SessionContext::new();
        let navigator = Navigator::new();
        let api = standard_client(
            &config.api_url,
            http,
            Arc::clone(&cookies),
            session.clone(),
            navigator.clone(),
        );

        let user = UserModule::new(api.clone(), session.clone());
        let router = Router::new(NavigationGuard::new(user.clone()), navigator);

        Self {
            blog: BlogModule::with_page_size(api.clone(), config.page_size),
            site: SiteModule::new(api.clone()),
            comments: CommentsModule::new(api.clone()),
            admin: AdminModule::new(api.clone()),
            user,
            router,
            session,
            cookies,
            api,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        self.router.navigator()
    }

    pub fn cookies(&self) -> &Arc<dyn CookieStore> {
        &self.cookies
    }

    /// Load site settings and restore any existing backend session.
    pub async fn bootstrap(&self) -> Option<User> {
        let (_, user) = tokio::join!(self.site.get_site_config(), self.user.get_current_user());
        match &user {
            Some(u) => tracing::info!(username = %u.username, "Restored session"),
            None => tracing::debug!("No existing session"),
        }
        user
    }

    /// Sign out and forget every stored cookie.
    pub async fn sign_out(&self) -> ApiResult<()> {
        self.user.logout().await;
        self.cookies.clear().await?;
        Ok(())
    }
}
