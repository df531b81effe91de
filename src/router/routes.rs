//! Route table.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    ArticleDetail,
    Category,
    Tag,
    Search,
    Login,
    Register,
    UserCenter,
    UserProfile,
    UserArticles,
    UserComments,
    WriteArticle,
    EditArticle,
    UserManagement,
    CategoryManage,
    NotFound,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Home => "Home",
            RouteName::ArticleDetail => "ArticleDetail",
            RouteName::Category => "Category",
            RouteName::Tag => "Tag",
            RouteName::Search => "Search",
            RouteName::Login => "Login",
            RouteName::Register => "Register",
            RouteName::UserCenter => "UserCenter",
            RouteName::UserProfile => "UserProfile",
            RouteName::UserArticles => "UserArticles",
            RouteName::UserComments => "UserComments",
            RouteName::WriteArticle => "WriteArticle",
            RouteName::EditArticle => "EditArticle",
            RouteName::UserManagement => "UserManagement",
            RouteName::CategoryManage => "CategoryManage",
            RouteName::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the table. `:name` segments capture a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub pattern: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

const fn public(name: RouteName, pattern: &'static str) -> Route {
    Route {
        name,
        pattern,
        requires_auth: false,
        requires_admin: false,
    }
}

const fn auth(name: RouteName, pattern: &'static str) -> Route {
    Route {
        name,
        pattern,
        requires_auth: true,
        requires_admin: false,
    }
}

const fn admin(name: RouteName, pattern: &'static str) -> Route {
    Route {
        name,
        pattern,
        requires_auth: true,
        requires_admin: true,
    }
}

pub const ROUTES: &[Route] = &[
    public(RouteName::Home, "/"),
    public(RouteName::ArticleDetail, "/article/:id"),
    public(RouteName::Category, "/category/:name"),
    public(RouteName::Tag, "/tag/:id"),
    public(RouteName::Search, "/search"),
    public(RouteName::Login, "/login"),
    public(RouteName::Register, "/register"),
    auth(RouteName::UserCenter, "/user"),
    auth(RouteName::UserProfile, "/user/profile"),
    auth(RouteName::UserArticles, "/user/articles"),
    auth(RouteName::UserComments, "/user/comments"),
    auth(RouteName::WriteArticle, "/write"),
    auth(RouteName::EditArticle, "/edit/:id"),
    admin(RouteName::UserManagement, "/admin/users"),
    admin(RouteName::CategoryManage, "/admin/categories"),
];

pub const NOT_FOUND: Route = public(RouteName::NotFound, "*");

/// A resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub params: HashMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Resolve `path` (no query) against [`ROUTES`], falling back to NotFound.
pub fn resolve(path: &str) -> RouteMatch {
    ROUTES
        .iter()
        .find_map(|route| {
            match_pattern(route.pattern, path).map(|params| RouteMatch {
                route: *route,
                params,
            })
        })
        .unwrap_or_else(|| RouteMatch {
            route: NOT_FOUND,
            params: HashMap::new(),
        })
}

fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        match expected.strip_prefix(':') {
            Some(name) if !actual.is_empty() => {
                let value = urlencoding::decode(actual)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| actual.to_string());
                params.insert(name.to_string(), value);
            }
            Some(_) => return None,
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        assert_eq!(resolve("/").route.name, RouteName::Home);
        assert_eq!(resolve("/user").route.name, RouteName::UserCenter);
        assert_eq!(resolve("/user/profile/").route.name, RouteName::UserProfile);
        assert_eq!(resolve("/admin/users").route.name, RouteName::UserManagement);
    }

    #[test]
    fn test_params_are_captured_and_decoded() {
        let m = resolve("/category/Web%20Dev");
        assert_eq!(m.route.name, RouteName::Category);
        assert_eq!(m.param("name"), Some("Web Dev"));

        let m = resolve("/edit/42");
        assert_eq!(m.route.name, RouteName::EditArticle);
        assert!(m.route.requires_auth);
        assert_eq!(m.param("id"), Some("42"));
    }

    #[test]
    fn test_unknown_is_not_found() {
        assert_eq!(resolve("/nope").route.name, RouteName::NotFound);
        assert_eq!(resolve("/article").route.name, RouteName::NotFound);
        assert_eq!(resolve("/article/1/extra").route.name, RouteName::NotFound);
    }

    #[test]
    fn test_admin_routes_require_auth() {
        for route in ROUTES.iter().filter(|r| r.requires_admin) {
            assert!(route.requires_auth, "{} must require auth", route.name);
        }
    }
}
