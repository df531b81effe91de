use blog_client::app::BlogApp;
use blog_client::cli::{parse_args, run_command, version_string, CliCommand, USAGE};
use blog_client::config::ClientConfig;

use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Ask for the password on the terminal when it was not given.
fn resolve_password(command: CliCommand) -> Result<CliCommand> {
    match command {
        CliCommand::Login {
            username,
            password: None,
        } => {
            let password = rpassword::prompt_password("Password: ")?;
            Ok(CliCommand::Login {
                username,
                password: Some(password),
            })
        }
        other => Ok(other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle flags before any initialization
    let command = parse_args(std::env::args());
    match &command {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    color_eyre::install()?;
    init_tracing();

    let config = ClientConfig::from_env()?;
    tracing::debug!(
        api_url = %config.api_url,
        cookie_file = ?config.cookie_file,
        "Loaded configuration"
    );

    let command = resolve_password(command)?;
    let app = BlogApp::from_config(config)?;
    run_command(&app, command, &mut std::io::stdout()).await
}
