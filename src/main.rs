//! radgroups - transitive LDAP group resolution for RADIUS authorization
//!
#![doc = "Main entry point for the radgroups CLI."]

use radgroups::cli::Cli;
use radgroups::commands;
use radgroups::config::Config;
use radgroups::error::{RadgroupsError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // All fatal errors map to exit code 2 with a diagnostic on stderr;
    // stdout carries only the attribute-value pairs.
    if let Err(error) = run(cli).await {
        eprintln!("ERROR: {:#}", error);
        std::process::exit(2);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Obtain the username (USER_NAME env var wins over the positional arg)
    let username = cli.resolve_username().ok_or_else(|| {
        RadgroupsError::Config(
            "no username passed (set USER_NAME or pass it as an argument)".to_string(),
        )
    })?;

    // Validate configuration
    config.validate()?;

    tracing::info!("Resolving groups for {}", username);

    commands::resolve::run_resolve(config, username).await
}

/// Initialize tracing subscriber with environment filter
///
/// Log output goes to stderr so stdout stays reserved for the formatted
/// attribute-value pairs.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "radgroups=debug"
    } else {
        "radgroups=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
