//! fishscope - semantic navigation CLI for fish scripts

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fishscope::app::App;
use fishscope::cli::{Cli, Commands};

fn main() {
    // Quiet by default; RUST_LOG=fishscope=debug for verbose output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fishscope=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    if let Err(e) = run() {
        // Errors use the same JSON envelope as results
        let response = serde_json::json!({
            "success": false,
            "error": format!("{:#}", e)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| format!(r#"{{"success":false,"error":"{}"}}"#, e))
        );
        std::process::exit(2);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app = App::new(cli.pretty).map_err(|e| anyhow::anyhow!("Failed to initialize: {}", e))?;

    execute_command(cli.command, &app)
}

fn execute_command(command: Commands, app: &App) -> anyhow::Result<()> {
    use fishscope::cli::commands;

    match command {
        Commands::Symbols(args) => commands::symbols::execute(args, app),
        Commands::Def(args) => commands::find::def(args, app),
        Commands::Refs(args) => commands::find::refs(args, app),
        Commands::Nearby(args) => commands::find::nearby(args, app),
        Commands::Kind(args) => commands::find::kind(args, app),
        Commands::Config(args) => commands::config::execute(args, app),
    }
}
