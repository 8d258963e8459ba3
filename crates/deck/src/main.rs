//! chaos-deck - Lay out the chaos-theory deck and emit its timeline as JSON

use anyhow::Context;
use clap::Parser;
use deck::{build_deck, DeckSettings, SceneName, SettingsManager};
use equation_layout::Renderer;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chaos-deck")]
#[command(about = "Lay out the chaos-theory deck and emit its slide timeline as JSON", long_about = None)]
struct Cli {
    /// Settings file (JSON); defaults are used when the flag is omitted
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Scene to record; repeat to pick several, in order (default: all)
    #[arg(long = "scene", value_name = "NAME")]
    scenes: Vec<SceneName>,

    /// Write the timeline here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit draw primitives for every scene object instead of the timeline
    #[arg(long)]
    primitives: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => SettingsManager::new(path.clone())
            .load_existing()
            .with_context(|| format!("loading settings from {}", path.display()))?
            .clone(),
        None => DeckSettings::default(),
    };
    let scenes = if cli.scenes.is_empty() {
        SceneName::ALL.to_vec()
    } else {
        cli.scenes
    };

    let deck = build_deck(&settings, &scenes)?;
    tracing::info!(
        scenes = scenes.len(),
        slides = deck.slide_count(),
        duration_s = deck.duration(),
        "deck recorded"
    );

    let json = if cli.primitives {
        serde_json::to_string_pretty(&deck.render(&Renderer::new()))?
    } else {
        serde_json::to_string_pretty(&deck)?
    };
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!("Timeline written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
