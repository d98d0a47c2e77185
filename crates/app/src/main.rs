use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Parser, Subcommand};
use keepsake_core::{
    layout::{self, RngJitter},
    AppConfig, Content, InputEvent, KeepsakeError, Presentation,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

fn main() -> keepsake_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            script,
            content,
            config,
            seed,
        } => run_play(&script, content.as_deref(), config.as_deref(), seed),
        Commands::Layout { shape } => run_layout(shape),
        Commands::Content { path } => run_content(path.as_deref()),
    }
}

/// One line of a playback script: deliver `event` once the clock reaches `at_ms`.
#[derive(Debug, Deserialize)]
struct ScriptStep {
    at_ms: u64,
    event: InputEvent,
}

fn run_play(
    script: &Path,
    content: Option<&Path>,
    config: Option<&Path>,
    seed: Option<u64>,
) -> keepsake_core::Result<()> {
    let config = match config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let content = load_content(content)?;
    let steps = parse_script(&std::fs::read_to_string(script)?)?;
    tracing::info!(?script, steps = steps.len(), seed, "playing script");

    let mut presentation = match seed {
        Some(seed) => Presentation::with_jitter(content, config, RngJitter::seeded(seed)),
        None => Presentation::new(content, config),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for step in steps {
        let target = Duration::from_millis(step.at_ms);
        let now = presentation.now();
        if target < now {
            tracing::warn!(
                at_ms = step.at_ms,
                "script step is in the past, delivering immediately"
            );
        }
        presentation.advance_by(target.saturating_sub(now));
        presentation.handle_input(step.event);

        serde_json::to_writer(&mut out, &presentation.frame())?;
        writeln!(out)?;
    }

    let transition = presentation.config().timing.scene_transition();
    presentation.advance_by(transition);
    serde_json::to_writer(&mut out, &presentation.frame())?;
    writeln!(out)?;

    tracing::info!(
        scene = ?presentation.active_scene(),
        epoch = presentation.epoch(),
        "script finished"
    );
    Ok(())
}

/// Decodes a playback script. A script with no steps is rejected since it
/// would only ever print the initial frame.
fn parse_script(raw: &str) -> keepsake_core::Result<Vec<ScriptStep>> {
    let steps: Vec<ScriptStep> = serde_json::from_str(raw)?;
    if steps.is_empty() {
        return Err(KeepsakeError::msg("playback script contains no steps"));
    }
    Ok(steps)
}

fn run_layout(shape: LayoutShape) -> keepsake_core::Result<()> {
    let json = match shape {
        LayoutShape::Heart { count, jitter, seed } => {
            let mut source = RngJitter::seeded(seed);
            serde_json::to_string_pretty(&layout::heart_curve(count, jitter, &mut source))?
        }
        LayoutShape::Orbit { count, radius } => {
            if radius <= 0.0 {
                return Err(KeepsakeError::InvalidInput("orbit radius must be positive"));
            }
            serde_json::to_string_pretty(&layout::orbit_layout(count, radius))?
        }
        LayoutShape::Carousel { active, total } => {
            serde_json::to_string_pretty(&layout::carousel_window(active, total))?
        }
    };
    println!("{json}");
    Ok(())
}

fn run_content(path: Option<&Path>) -> keepsake_core::Result<()> {
    let content = load_content(path)?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

fn load_content(path: Option<&Path>) -> keepsake_core::Result<Content> {
    match path {
        Some(path) => {
            tracing::debug!(?path, "loading content");
            Content::load(path)
        }
        None => Ok(Content::demo()),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive anniversary keepsake, headless", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a scripted input sequence and print one JSON frame per step.
    Play {
        /// JSON array of `{ "at_ms": .., "event": .. }` steps.
        #[arg(short, long)]
        script: PathBuf,
        /// Content file. Falls back to the bundled demo set.
        #[arg(long)]
        content: Option<PathBuf>,
        /// Config file overriding timing and layout defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seed for decorative jitter, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print computed layout positions.
    Layout {
        #[command(subcommand)]
        shape: LayoutShape,
    },
    /// Print the content set as JSON.
    Content {
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum LayoutShape {
    /// Finale heart curve.
    Heart {
        #[arg(long, default_value_t = 13)]
        count: usize,
        /// Maximum rotation jitter in degrees.
        #[arg(long, default_value_t = 15.0)]
        jitter: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Memory universe orbit.
    Orbit {
        #[arg(long, default_value_t = 13)]
        count: usize,
        #[arg(long, default_value_t = 150.0)]
        radius: f64,
    },
    /// Visible carousel window.
    Carousel {
        #[arg(long)]
        active: usize,
        #[arg(long)]
        total: usize,
    },
}
