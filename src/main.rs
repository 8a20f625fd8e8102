mod animation;
mod app;
mod config;
mod demo;
mod error;
mod event;
mod input;
mod logging;
mod positioning;
mod render;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use app::{App, AppConfig};
use config::{parse_rect, parse_size, WidgetConfig};
use demo::DEFAULT_GIVE_UP_AFTER;
use error::Result;
use logging::LogArgs;
use positioning::prober::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PADDING};
use positioning::{find_safe_position, Prober, Rect, Size};

/// Valentine: a yes/no prompt where "No" is hard to catch
///
/// Asks the question in your terminal. The "No" button jumps to a random free
/// spot whenever the pointer (or keyboard focus) comes near it, so "Yes" is the
/// only answer that sticks.
#[derive(Parser, Debug)]
#[command(name = "valentine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON file with question text, labels, asset path and placement tuning
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for reproducible placement
    #[arg(long)]
    seed: Option<u64>,

    /// Let a simulated pointer chase the "No" button
    #[arg(long)]
    demo: bool,

    /// Dodges before the demo pointer gives up and picks "Yes"
    #[arg(long, value_name = "DODGES")]
    give_up_after: Option<u32>,

    /// Start with the placement overlay visible
    #[arg(long)]
    debug: bool,

    /// Cells kept clear around obstacles and screen edges
    #[arg(long)]
    padding: Option<f32>,

    /// Random candidates tried before the corner fallback
    #[arg(long)]
    attempts: Option<u32>,

    /// Cells around "No" that count as approaching it
    #[arg(long)]
    proximity: Option<u16>,

    /// Delay before the first placement; 0 places on the first frame
    #[arg(long, value_name = "MS")]
    placement_delay_ms: Option<u64>,

    #[command(flatten)]
    log: LogArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one placement without a terminal UI and print it as JSON
    Probe {
        /// Container size, e.g. 800x600
        #[arg(long, value_parser = parse_size)]
        container: Size,

        /// Size of the element to place, e.g. 100x50
        #[arg(long, value_parser = parse_size)]
        size: Size,

        /// Obstacle as LEFT,TOP,WIDTH,HEIGHT (repeatable)
        #[arg(long = "obstacle", value_parser = parse_rect)]
        obstacles: Vec<Rect>,

        #[arg(long, default_value_t = DEFAULT_PADDING)]
        padding: f32,

        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        attempts: u32,

        #[arg(long)]
        seed: Option<u64>,

        /// Print only the position
        #[arg(long)]
        position_only: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Command::Probe {
        container,
        size,
        obstacles,
        padding,
        attempts,
        seed,
        position_only,
    }) = &cli.command
    {
        logging::init(&cli.log, true)?;
        let request = ProbeRequest {
            container: *container,
            size: *size,
            obstacles: obstacles.clone(),
            padding: *padding,
            attempts: *attempts,
            seed: *seed,
        };
        let output = if *position_only {
            request.position_json()?
        } else {
            request.probe_json()?
        };
        println!("{}", output);
        return Ok(());
    }

    logging::init(&cli.log, false)?;
    let config = app_config(&cli)?;
    info!(
        padding = config.widget.padding,
        max_attempts = config.widget.max_attempts,
        "configuration loaded"
    );

    let mut app = App::new(config);
    app.run().await?;
    Ok(())
}

/// Merge the config file (if any) with command-line overrides
fn app_config(cli: &Cli) -> Result<AppConfig> {
    let mut widget = match &cli.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };

    if let Some(padding) = cli.padding {
        widget.padding = padding;
    }
    if let Some(attempts) = cli.attempts {
        widget.max_attempts = attempts;
    }
    if let Some(proximity) = cli.proximity {
        widget.proximity = proximity;
    }
    if let Some(delay) = cli.placement_delay_ms {
        widget.placement_delay_ms = delay;
    }

    Ok(AppConfig {
        widget,
        demo_mode: cli.demo,
        demo_give_up: cli.give_up_after.unwrap_or(DEFAULT_GIVE_UP_AFTER),
        seed: cli.seed,
        debug: cli.debug,
    })
}

/// Arguments of the `probe` command
#[derive(Debug, Clone)]
struct ProbeRequest {
    container: Size,
    size: Size,
    obstacles: Vec<Rect>,
    padding: f32,
    attempts: u32,
    seed: Option<u64>,
}

impl ProbeRequest {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn container_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.container.width, self.container.height)
    }

    /// Full probe result: position, attempts and outcome
    fn probe_json(&self) -> Result<String> {
        let prober = Prober::new(self.padding, self.attempts);
        let probe = prober.probe(&self.container_rect(), self.size, &self.obstacles, &mut self.rng());
        info!(attempts = probe.attempts, outcome = ?probe.outcome, "probe finished");
        Ok(serde_json::to_string_pretty(&probe)?)
    }

    fn position_json(&self) -> Result<String> {
        let position = find_safe_position(
            &self.container_rect(),
            self.size,
            &self.obstacles,
            self.padding,
            self.attempts,
            &mut self.rng(),
        );
        Ok(serde_json::to_string(&position)?)
    }
}
