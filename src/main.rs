//! secret-santa CLI - run a Secret Santa exchange from the command line

use clap::Parser;
use secret_santa::cli::{commands, Cli, Commands};
use secret_santa::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) if e.is_rejection() => {
            eprintln!("{}", e);
            std::process::exit(to_exit_code(&e));
        }
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> secret_santa::Result<()> {
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Some(Commands::Create { name, actor }) => commands::create::run(data_dir, &name, &actor).await,
        Some(Commands::Join { actor }) => commands::join::run(data_dir, &actor).await,
        Some(Commands::Leave { actor }) => commands::leave::run(data_dir, &actor).await,
        Some(Commands::Start { actor }) => commands::start::run(data_dir, &actor).await,
        Some(Commands::Status { actor, json }) => commands::status::run(data_dir, &actor, json).await,
        Some(Commands::Cancel { actor }) => commands::cancel::run(data_dir, &actor).await,
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
