//! Command-line argument parsing for the blog CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Sign in; the password is prompted for when omitted
    Login {
        username: String,
        password: Option<String>,
    },
    Logout,
    /// Show the signed-in user
    WhoAmI,
    /// List one page of articles
    Articles { page: u32 },
    /// Show one article
    Article { id: u64 },
    /// Toggle a like on an article
    Like { id: u64 },
    Categories,
    Tags,
    /// List comments on an article
    Comments { article_id: u64 },
    /// Show site settings
    Site,
    /// Show site statistics
    Stats,
    /// Resolve a path through the router and guard
    Route { path: String },
    /// Arguments could not be parsed
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: blog <command> [args]

Commands:
  login <username> [password]   Sign in (prompts for the password if omitted)
  logout                        Sign out and forget stored cookies
  whoami                        Show the signed-in user
  articles [page]               List articles
  article <id>                  Show an article
  like <id>                     Like or unlike an article
  categories                    List categories
  tags                          List tags
  comments <article-id>         List comments on an article
  site                          Show site settings
  stats                         Show site statistics
  route <path>                  Check where navigating to <path> lands

Options:
  -h, --help                    Show this help
  -V, --version                 Show version

Environment:
  BLOG_API_URL, BLOG_COOKIE_FILE, BLOG_TIMEOUT_SECS, BLOG_PAGE_SIZE, RUST_LOG";

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use blog_client::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["blog".to_string(), "article".to_string(), "5".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Article { id: 5 });
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        return CliCommand::Version;
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return CliCommand::Help;
    }

    let Some(command) = args.first() else {
        return CliCommand::Help;
    };
    let rest = &args[1..];

    match command.as_str() {
        "login" => match rest {
            [username] => CliCommand::Login {
                username: username.clone(),
                password: None,
            },
            [username, password] => CliCommand::Login {
                username: username.clone(),
                password: Some(password.clone()),
            },
            _ => CliCommand::Invalid("login expects <username> [password]".to_string()),
        },
        "logout" => CliCommand::Logout,
        "whoami" => CliCommand::WhoAmI,
        "articles" => match rest.first() {
            None => CliCommand::Articles { page: 1 },
            Some(raw) => match raw.parse::<u32>() {
                Ok(page) if page > 0 => CliCommand::Articles { page },
                _ => CliCommand::Invalid(format!("invalid page number: {}", raw)),
            },
        },
        "article" => with_id(rest, "article", |id| CliCommand::Article { id }),
        "like" => with_id(rest, "like", |id| CliCommand::Like { id }),
        "comments" => with_id(rest, "comments", |article_id| CliCommand::Comments { article_id }),
        "categories" => CliCommand::Categories,
        "tags" => CliCommand::Tags,
        "site" => CliCommand::Site,
        "stats" => CliCommand::Stats,
        "route" => match rest.first() {
            Some(path) => CliCommand::Route { path: path.clone() },
            None => CliCommand::Invalid("route expects <path>".to_string()),
        },
        other => CliCommand::Invalid(format!("unknown command: {}", other)),
    }
}

fn with_id(rest: &[String], name: &str, build: impl FnOnce(u64) -> CliCommand) -> CliCommand {
    match rest.first().map(|raw| raw.parse::<u64>()) {
        Some(Ok(id)) => build(id),
        Some(Err(_)) => CliCommand::Invalid(format!("{} expects a numeric id", name)),
        None => CliCommand::Invalid(format!("{} expects <id>", name)),
    }
}
