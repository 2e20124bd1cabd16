use clap::Parser;
use persona::{App, AppConfig, ExitReason, SessionStore, init_logging};
use persona_core::Identity;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "persona")]
#[command(about = "Submit text for personality analysis and browse past submissions")]
struct Args {
    /// Path to the data directory (default: ~/.persona/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Analysis service URL, overriding config.yaml
    #[arg(short, long)]
    base_url: Option<String>,

    /// Sign in as this email and remember it for later runs
    #[arg(short, long)]
    email: Option<String>,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".persona")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let mut config = AppConfig::load_or_default(&data_dir);
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let session = SessionStore::new(&data_dir);
    if let Some(email) = args.email {
        session.save(&Identity::new(email))?;
    }
    let identity = session.identity();

    let mut app = App::new(&config, identity);

    let reason = ratatui::run(|terminal| app.run(terminal))?;

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    match reason {
        ExitReason::Logout => {
            session.clear()?;
            tracing::info!("Session cleared after logout");
            println!("Logged out. Run `persona --email <address>` to sign in again.");
        }
        ExitReason::Quit => tracing::info!("Application shutting down"),
    }

    Ok(())
}
