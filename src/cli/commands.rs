//! Command execution against a wired [`BlogApp`].

use color_eyre::eyre::{eyre, Result};
use std::io::Write;

use super::args::CliCommand;
use crate::app::BlogApp;
use crate::error::ApiError;
use crate::models::{parse_timestamp, ArticleQuery, ArticleSummary, Comment, LoginRequest};
use crate::router::GuardOutcome;

/// Run one command, writing human-readable output to `out`.
///
/// `Login` must carry a password by the time it gets here.
pub async fn run_command<W: Write>(app: &BlogApp, command: CliCommand, out: &mut W) -> Result<()> {
    match command {
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => {
            Err(eyre!("{:?} is handled before the client starts", command))
        }
        CliCommand::Login { username, password } => {
            let password = password.ok_or_else(|| eyre!("password required"))?;
            let response = app
                .user
                .login(&LoginRequest::new(username, password))
                .await
                .map_err(report)?;
            writeln!(out, "Signed in as {}", response.user.display_name())?;
            Ok(())
        }
        CliCommand::Logout => {
            app.sign_out().await?;
            writeln!(out, "Signed out")?;
            Ok(())
        }
        CliCommand::WhoAmI => {
            match app.user.get_current_user().await {
                Some(user) => {
                    writeln!(out, "{} (id {})", user.display_name(), user.id)?;
                    writeln!(out, "  username: {}", user.username)?;
                    if let Some(email) = user.email.as_deref().filter(|e| !e.is_empty()) {
                        writeln!(out, "  email:    {}", email)?;
                    }
                    writeln!(out, "  staff:    {}", if user.is_staff { "yes" } else { "no" })?;
                    writeln!(
                        out,
                        "  articles: {}  comments: {}",
                        user.article_count, user.comment_count
                    )?;
                }
                None => writeln!(out, "Not signed in")?,
            }
            Ok(())
        }
        CliCommand::Articles { page } => {
            app.blog.fetch_articles(&ArticleQuery::new().page(page)).await?;
            let pagination = app.blog.pagination();
            for article in app.blog.articles() {
                writeln!(out, "{}", article_line(&article))?;
            }
            writeln!(
                out,
                "Page {} of {} ({} articles)",
                pagination.current,
                pagination.total_pages().max(1),
                pagination.total
            )?;
            Ok(())
        }
        CliCommand::Article { id } => {
            let article = app.blog.fetch_article_detail(id).await?;
            writeln!(out, "{}", article.title())?;
            if let Some(author) = &article.summary.author {
                writeln!(out, "by {}", author.display_name())?;
            }
            if let Some(date) = format_date(article.summary.published_at.as_deref()) {
                writeln!(out, "published {}", date)?;
            }
            if !article.summary.tags.is_empty() {
                let tags: Vec<_> = article.summary.tags.iter().map(|t| t.name.as_str()).collect();
                writeln!(out, "tags: {}", tags.join(", "))?;
            }
            writeln!(
                out,
                "{} views, {} likes, {} comments",
                article.summary.view_count,
                article.like_count(),
                article.summary.comment_count
            )?;
            writeln!(out)?;
            writeln!(out, "{}", article.content)?;
            Ok(())
        }
        CliCommand::Like { id } => {
            let response = app.blog.like_article(id).await.map_err(report)?;
            let verb = if response.is_liked { "Liked" } else { "Unliked" };
            writeln!(out, "{} article {} ({} likes)", verb, id, response.like_count)?;
            Ok(())
        }
        CliCommand::Categories => {
            for category in app.blog.fetch_categories().await? {
                writeln!(
                    out,
                    "{:>4}  {} ({})",
                    category.id, category.name, category.article_count
                )?;
            }
            Ok(())
        }
        CliCommand::Tags => {
            for tag in app.blog.fetch_tags().await? {
                writeln!(out, "{:>4}  {} ({})", tag.id, tag.name, tag.use_count)?;
            }
            Ok(())
        }
        CliCommand::Comments { article_id } => {
            let comments = app.comments.fetch_comments(article_id).await?;
            if comments.is_empty() {
                writeln!(out, "No comments")?;
            }
            for comment in &comments {
                writeln!(out, "{}", comment_line(comment))?;
                for reply in &comment.replies {
                    writeln!(out, "    {}", comment_line(reply))?;
                }
            }
            Ok(())
        }
        CliCommand::Site => {
            app.site.get_site_config().await;
            let config = app.site.site_config();
            writeln!(out, "{}", config.site_name)?;
            writeln!(out, "{}", config.site_description)?;
            writeln!(out, "keywords: {}", config.site_keywords)?;
            writeln!(out, "registration: {}", enabled(config.allow_register))?;
            writeln!(out, "comment moderation: {}", enabled(config.comment_need_audit))?;
            Ok(())
        }
        CliCommand::Stats => {
            app.site.get_statistics().await;
            let stats = app.site.statistics();
            writeln!(out, "articles:   {}", stats.article_count)?;
            writeln!(out, "users:      {}", stats.user_count)?;
            writeln!(out, "comments:   {}", stats.comment_count)?;
            writeln!(out, "categories: {}", stats.category_count)?;
            writeln!(out, "tags:       {}", stats.tag_count)?;
            Ok(())
        }
        CliCommand::Route { path } => {
            let navigation = app.router.navigate(&path).await;
            let verdict = match &navigation.outcome {
                GuardOutcome::Proceed => "allowed",
                GuardOutcome::RedirectToLogin(_) => "sign-in required",
                GuardOutcome::RedirectHome(_) => "not permitted",
            };
            writeln!(
                out,
                "{} -> {} [{}] ({})",
                path, navigation.location, navigation.matched.route.name, verdict
            )?;
            Ok(())
        }
    }
}

/// Short user-facing report for a failed action.
fn report(err: ApiError) -> color_eyre::Report {
    tracing::debug!(code = err.error_code(), "{}", err);
    eyre!("{} ({})", err.user_message(), err.recovery_hint())
}

fn article_line(article: &ArticleSummary) -> String {
    let mut line = format!("{:>5}  {}", article.id, article.title);
    if article.is_top {
        line.push_str(" [top]");
    }
    if let Some(date) = format_date(article.published_at.as_deref()) {
        line.push_str(&format!("  ({})", date));
    }
    line.push_str(&format!("  ♥{}", article.like_count));
    line
}

fn comment_line(comment: &Comment) -> String {
    let who = comment
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "anonymous".to_string());
    format!("#{} {}: {} ({} likes)", comment.id, who, comment.content, comment.like_count)
}

fn format_date(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_timestamp)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::adapters::MemoryCookieStore;
    use crate::config::ClientConfig;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://test.local";

    fn app(mock: &MockHttpClient) -> BlogApp {
        BlogApp::with_parts(
            ClientConfig::new().with_api_url(BASE),
            Arc::new(mock.clone()),
            Arc::new(MemoryCookieStore::new()),
        )
    }

    async fn run(app: &BlogApp, command: CliCommand) -> String {
        let mut out = Vec::new();
        run_command(app, command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_articles_output() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"count": 11, "results": [
                {"id": 1, "title": "Hello", "is_top": true, "like_count": 2,
                 "published_at": "2024-05-01T12:30:00+08:00"}
            ]}),
        ));

        let output = run(&app(&mock), CliCommand::Articles { page: 2 }).await;
        assert!(output.contains("Hello [top]  (2024-05-01)"));
        assert!(output.contains("Page 2 of 2 (11 articles)"));
    }

    #[tokio::test]
    async fn test_route_reports_redirect() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(401, json!({"message": "no"})));

        let output = run(&app(&mock), CliCommand::Route { path: "/write".into() }).await;
        assert_eq!(
            output.trim(),
            "/write -> /login?redirect=%2Fwrite [Login] (sign-in required)"
        );
    }

    #[tokio::test]
    async fn test_site_falls_back_to_defaults() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(500, json!({"error": "down"})));

        let output = run(&app(&mock), CliCommand::Site).await;
        assert!(output.starts_with("Personal Blog\n"));
        assert!(output.contains("registration: enabled"));
    }

    #[tokio::test]
    async fn test_login_requires_password() {
        let app = app(&MockHttpClient::new());
        let mut out = Vec::new();
        let result = run_command(
            &app,
            CliCommand::Login {
                username: "ada".into(),
                password: None,
            },
            &mut out,
        )
        .await;
        assert!(result.is_err());
    }
}
