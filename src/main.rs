use clap::{Parser, Subcommand};
use log::info;
use scicalc::{config::Config, error::CalcResult, ReplEngine, Session};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "scicalc")]
#[command(about = "An interactive scientific calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Evaluate a single expression and exit
    #[arg(short = 'e', long)]
    expression: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
    /// Show configuration information
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CalcResult<ExitCode> {
    info!("Starting scicalc v{}", scicalc::VERSION);

    let config = Config::load(cli.config.as_deref()).await?;

    if let Some(command) = cli.command {
        handle_command(command, &config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(expression) = cli.expression {
        let mut session = Session::new(config);
        return match session.evaluate(&expression) {
            Ok(computation) => {
                println!("{}", computation.value);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) if e.is_recoverable() => {
                eprintln!("❌ {}", e);
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        };
    }

    let mut repl = ReplEngine::new(config)?;
    repl.run_interactive()?;
    Ok(ExitCode::SUCCESS)
}

async fn handle_command(command: Commands, config: &Config) -> CalcResult<()> {
    match command {
        Commands::Init { force } => {
            let path = config.init(force).await?;
            println!("✓ Configuration initialized at {}", path.display());
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }
    Ok(())
}
