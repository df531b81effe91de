//! Session identity: login, logout, profile.

use crate::api::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult, ErrorContext, ResultExt};
use crate::models::{
    Captcha, LoginRequest, LoginResponse, MessageResponse, PasswordChange, ProfileUpdate,
    RegisterRequest, RegisterResponse, User, CAPTCHA_KEY_HEADER,
};

use super::session::SessionContext;

const LOGIN_PATH: &str = "/api/users/login/";
const REGISTER_PATH: &str = "/api/users/register/";
const LOGOUT_PATH: &str = "/api/users/logout/";
const CURRENT_PATH: &str = "/api/users/current/";
const PROFILE_PATH: &str = "/api/users/profile/";
const CHANGE_PASSWORD_PATH: &str = "/api/users/change-password/";
const CAPTCHA_PATH: &str = "/api/users/captcha/image/";

/// Owns the session; the only writer besides the 401 handler.
#[derive(Debug, Clone)]
pub struct UserModule {
    api: ApiClient,
    session: SessionContext,
}

impl UserModule {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    // Selectors

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.session.snapshot().current_user.map(|u| u.id)
    }

    pub fn username(&self) -> Option<String> {
        self.session.snapshot().current_user.map(|u| u.username)
    }

    pub fn display_name(&self) -> Option<String> {
        self.session
            .snapshot()
            .current_user
            .map(|u| u.display_name().to_string())
    }

    pub fn is_staff(&self) -> bool {
        self.session.is_staff()
    }

    // Actions

    /// Sign in and store the returned identity.
    ///
    /// A rejected login (400/401/403) comes back as
    /// [`ApiError::InvalidCredentials`] carrying the backend's message.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let response: LoginResponse = match self.api.post_json(LOGIN_PATH, credentials).await {
            Ok(response) => response,
            Err(err) => return Err(map_login_error(err)),
        };
        self.session.set_user(response.user.clone());
        Ok(response)
    }

    /// Fetch a fresh registration captcha.
    ///
    /// The image is passed through untouched; its key comes from the
    /// `X-Captcha-Key` response header.
    pub async fn fetch_captcha(&self) -> ApiResult<Captcha> {
        let response = self
            .api
            .send(ApiRequest::get(CAPTCHA_PATH))
            .await
            .with_context(|| ErrorContext::new("fetch_captcha").with_module("user"))?;
        let key = response
            .header(CAPTCHA_KEY_HEADER)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::Decode {
                    message: format!("captcha response has no {} header", CAPTCHA_KEY_HEADER),
                }
                .with_context(ErrorContext::new("fetch_captcha").with_module("user"))
            })?;
        Ok(Captcha {
            key,
            image: response.body,
        })
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, data: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.api
            .post_json(REGISTER_PATH, data)
            .await
            .with_context(|| ErrorContext::new("register").with_module("user"))
    }

    /// Sign out. The local session is cleared even if the backend call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.api.post_empty::<MessageResponse>(LOGOUT_PATH).await {
            tracing::warn!("Logout request failed, clearing session anyway: {}", e);
        }
        self.session.clear();
    }

    /// Ask the backend for the current session.
    ///
    /// Any failure, including a transport error, is treated as signed out.
    pub async fn get_current_user(&self) -> Option<User> {
        match self.api.get_json::<User>(CURRENT_PATH).await {
            Ok(user) => {
                self.session.set_user(user.clone());
                Some(user)
            }
            Err(e) => {
                tracing::debug!("No current user: {}", e);
                self.session.clear();
                None
            }
        }
    }

    /// Update profile fields and fold the result into the stored identity.
    pub async fn update_profile(&self, data: &ProfileUpdate) -> ApiResult<Option<User>> {
        let returned: ProfileUpdate = self
            .api
            .patch_json(PROFILE_PATH, data)
            .await
            .with_context(|| ErrorContext::new("update_profile").with_module("user"))?;
        self.session.modify_user(|user| user.apply_profile(returned));
        Ok(self.session.current_user())
    }

    pub async fn change_password(&self, data: &PasswordChange) -> ApiResult<MessageResponse> {
        self.api
            .post_json(CHANGE_PASSWORD_PATH, data)
            .await
            .with_context(|| ErrorContext::new("change_password").with_module("user"))
    }
}

fn map_login_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Unauthorized { message } | ApiError::Forbidden { message } => {
            ApiError::InvalidCredentials { message }
        }
        ApiError::Validation {
            status: 400,
            message,
            ..
        } => ApiError::InvalidCredentials { message },
        other => other,
    }
}
