//! Account records and request payloads for `/api/users/`.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Profile gender as the backend encodes it (0 unknown, 1 male, 2 female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Gender {
    #[default]
    Unknown,
    Male,
    Female,
}

impl From<u8> for Gender {
    fn from(value: u8) -> Self {
        match value {
            1 => Gender::Male,
            2 => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl From<Gender> for u8 {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Unknown => 0,
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }
}

/// Identity record for a signed-in (or listed) user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub article_count: u64,
    #[serde(default)]
    pub comment_count: u64,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Nickname when set, otherwise the username.
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nick) if !nick.trim().is_empty() => nick,
            _ => &self.username,
        }
    }

    /// Overlay the profile fields the backend returned after an update.
    pub fn apply_profile(&mut self, profile: ProfileUpdate) {
        if profile.nickname.is_some() {
            self.nickname = profile.nickname;
        }
        if profile.bio.is_some() {
            self.bio = profile.bio;
        }
        if profile.email.is_some() {
            self.email = profile.email;
        }
        if profile.phone.is_some() {
            self.phone = profile.phone;
        }
        if let Some(gender) = profile.gender {
            self.gender = gender;
        }
        if profile.birthday.is_some() {
            self.birthday = profile.birthday;
        }
        if profile.avatar.is_some() {
            self.avatar = profile.avatar;
        }
    }
}

/// Login form. `username` may also be a phone number.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

/// Registration form, including the image captcha answer.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub captcha_key: String,
    pub captcha_code: String,
}

/// Header carrying the key that identifies a captcha image.
pub const CAPTCHA_KEY_HEADER: &str = "X-Captcha-Key";

/// A registration captcha: the key to send back with the answer, and the PNG
/// the answer is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    pub key: String,
    pub image: Bytes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: u64,
    pub username: String,
}

/// Partial profile update; only set fields are sent.
///
/// The backend answers a profile PATCH with the same partial shape, so this
/// also decodes the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleStatusResponse {
    #[serde(default)]
    pub message: String,
    pub is_active: bool,
}

/// Account counts for the management dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserStatistics {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub staff_users: u64,
    pub new_users_30d: u64,
    pub active_users_7d: u64,
}
