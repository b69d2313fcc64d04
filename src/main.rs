mod cli;
mod config;
mod core;
mod error;
mod output;
mod tui;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::core::{Analyzer, OpenAiNarrator, TranscriptService, YouTubeDataClient};
use crate::error::Result;
use crate::tui::{App, EventHandler, init as tui_init, restore as tui_restore, ui};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // The TUI owns the terminal, so it stays quiet unless RUST_LOG asks otherwise.
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(if interactive { "off" } else { "tubescope=info" });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_analyzer(config: &Config) -> Result<Analyzer> {
    Ok(Analyzer::new(
        Arc::new(YouTubeDataClient::new(config.youtube_api_key())),
        Arc::new(TranscriptService::new(config.languages.clone())?),
        Arc::new(OpenAiNarrator::new(config)),
    ))
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.settings.into_config()?;
    tracing::debug!(?config, "configuration loaded");
    let analyzer = build_analyzer(&config)?;

    match cli.command {
        Some(Commands::Analyze {
            url,
            competitor,
            json,
            width,
        }) => run_cli_analyze(&analyzer, &url, competitor.as_deref(), json, width).await,
        Some(Commands::Info { url }) => {
            let lookup = analyzer.lookup(&url).await?;
            println!("{}", output::render_metadata_table(&lookup.metadata));
            Ok(())
        }
        Some(Commands::Transcript { url }) => {
            let transcript = analyzer.transcript(&url).await?;
            for line in transcript.timestamped_lines() {
                println!("{line}");
            }
            Ok(())
        }
        Some(Commands::Tui) | None => run_tui(analyzer).await,
    }
}

async fn run_cli_analyze(
    analyzer: &Analyzer,
    url: &str,
    competitor: Option<&str>,
    json: bool,
    width: usize,
) -> Result<()> {
    let primary = analyzer.lookup(url).await?;
    let analysis = if json {
        analyzer.analyze(&primary, competitor).await?
    } else {
        analyzer
            .analyze_with(&primary, competitor, |stage| eprintln!("{stage}"))
            .await?
    };

    if json {
        println!("{}", output::render_json(&analysis)?);
    } else {
        println!("{}", output::render_analysis(&analysis, width));
    }
    Ok(())
}

async fn run_tui(analyzer: Analyzer) -> Result<()> {
    let mut terminal = tui_init()?;

    let mut app = App::new(analyzer);
    let event_handler = EventHandler::new();

    let result = loop {
        let event = match event_handler.next_event() {
            Ok(event) => event,
            Err(e) => break Err(e),
        };
        if let Err(e) = app.handle_event(event) {
            break Err(e);
        }

        if let Err(e) = terminal.draw(|f| ui::draw(f, &mut app)) {
            break Err(e.into());
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore the terminal even when the loop failed.
    tui_restore()?;
    result
}
