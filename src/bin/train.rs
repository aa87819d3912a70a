use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ludo_trainer::ai::QLearningAgent;
use ludo_trainer::config::AppConfig;
use ludo_trainer::game::{LudoGame, Seat};
use ludo_trainer::training::{LogSink, Trainer};

/// Train a Ludo agent with tabular Q-learning against random opponents.
#[derive(Parser)]
#[command(name = "train", about = "Train a Ludo AI using Q-Learning")]
struct Cli {
    /// Learning rate [default: 0.1]
    #[arg(long)]
    lr: Option<f64>,

    /// Discount factor [default: 0.4]
    #[arg(long)]
    df: Option<f64>,

    /// Exploration rate [default: 0.05]
    #[arg(long)]
    er: Option<f64>,

    /// Number of training games [default: 1000]
    #[arg(long)]
    games: Option<usize>,

    /// Number of games per evaluation batch [default: 25]
    #[arg(long)]
    eval_games: Option<usize>,

    /// Start evaluating after this many training games [default: 800]
    #[arg(long)]
    eval_after: Option<usize>,

    /// Seat controlled by the learning agent (0-3) [default: 0]
    #[arg(long)]
    seat: Option<u8>,

    /// Seed dice, opponents and exploration for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the Q-table, win rates and plot [default: data]
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plot win rates after training
    #[arg(long)]
    plot: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    init_logging(cli.verbose);

    let mut config = AppConfig::load_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "loading config from {}",
            cli.config.as_deref().unwrap_or(Path::new("<defaults>")).display()
        )
    })?;
    apply_overrides(&mut config, &cli)?;
    config.validate().context("invalid configuration")?;

    let seed = config.training.seed;
    let mut dice = match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(2)),
        None => StdRng::from_os_rng(),
    };
    let games = move || LudoGame::with_seed(dice.random());
    let agent = match seed {
        Some(s) => QLearningAgent::seeded(config.hyper, s.wrapping_add(1)),
        None => QLearningAgent::new(config.hyper),
    };

    let mut trainer = Trainer::new(config.training.clone(), agent, games, LogSink);
    trainer.train(config.hyper).context("training failed")?;

    if cli.plot {
        trainer.plot_win_rates().context("writing win rate plot")?;
    }

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) -> Result<()> {
    if let Some(lr) = cli.lr {
        config.hyper.learning_rate = lr;
    }
    if let Some(df) = cli.df {
        config.hyper.discount_factor = df;
    }
    if let Some(er) = cli.er {
        config.hyper.explore_rate = er;
    }
    if let Some(games) = cli.games {
        config.training.training_games = games;
    }
    if let Some(eval_games) = cli.eval_games {
        config.training.eval_games = eval_games;
    }
    if let Some(eval_after) = cli.eval_after {
        config.training.eval_after = eval_after;
    }
    if let Some(seat) = cli.seat {
        config.training.controlled_seat = Seat::try_from(seat)?;
    }
    if let Some(seed) = cli.seed {
        config.training.seed = Some(seed);
    }
    if let Some(dir) = &cli.results_dir {
        config.training.results_dir = dir.clone();
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
