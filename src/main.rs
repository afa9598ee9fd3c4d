use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use relaychat::connector::api::{Container, ContainerConfig, Router};
use relaychat::Commands;

#[derive(Parser)]
#[command(name = "relaychat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer with the offline echo provider instead of Hugging Face
    #[arg(long, global = true)]
    mock_provider: bool,

    /// Write logs to this file (the chat widget discards them otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let container = Container::new(ContainerConfig {
        mock_provider: cli.mock_provider,
    });
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    // The terminal belongs to the widget while chatting.
    match (&cli.log_file, &cli.command) {
        (Some(path), _) => {
            let file = File::create(path)?;
            let subscriber = builder.with_ansi(false).with_writer(Mutex::new(file)).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        (None, Commands::Chat { .. }) => {
            let subscriber = builder.with_writer(std::io::sink).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        (None, _) => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn serve_defaults_to_loopback() {
        let cli = Cli::try_parse_from(["relaychat", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.to_string(), "127.0.0.1:3000"),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn send_requires_a_message() {
        assert!(Cli::try_parse_from(["relaychat", "send"]).is_err());

        let cli = Cli::try_parse_from(["relaychat", "--mock-provider", "send", "Olá"]).unwrap();
        assert!(cli.mock_provider);
        match cli.command {
            Commands::Send { message, endpoint } => {
                assert_eq!(message, "Olá");
                assert_eq!(endpoint, "http://127.0.0.1:3000/api/chat");
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn max_tokens_flag_does_not_exist() {
        let res = Cli::try_parse_from(["relaychat", "--max-tokens", "500", "serve"]);
        assert!(res.is_err(), "generation cap is not configurable");
    }
}
