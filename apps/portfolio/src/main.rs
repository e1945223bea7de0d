use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::{load_settings, store_from_settings};
use tracing_subscriber::EnvFilter;

mod app;
mod render;

use app::Command;

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Render the portfolio's projects and blog")]
struct Cli {
    /// Settings file; defaults to ./portfolio.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    let store = store_from_settings(&settings);

    let output = app::run(cli.command.unwrap_or(Command::Page), store).await;
    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_page_without_subcommand() {
        let cli = Cli::try_parse_from(["portfolio"]).expect("parse");
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn parses_blog_id_and_global_config() {
        let cli = Cli::try_parse_from([
            "portfolio",
            "blog",
            "9d7e3a10-55c1-4f0b-8a62-c2d41b7e9f01",
            "--config",
            "site.toml",
        ])
        .expect("parse");
        let Some(Command::Blog { id }) = cli.command else {
            panic!("expected blog command");
        };
        assert_eq!(id.to_string(), "9d7e3a10-55c1-4f0b-8a62-c2d41b7e9f01");
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    }

    #[test]
    fn rejects_malformed_blog_id() {
        assert!(Cli::try_parse_from(["portfolio", "blog", "42"]).is_err());
    }
}
