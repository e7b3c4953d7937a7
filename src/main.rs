mod io;
mod model;
mod simulation;
mod strategy;

use crate::io::{inputs, reporting};
use crate::simulation::config::GameConfig;
use crate::simulation::engine::{BertrandSimulation, CournotSimulation};
use crate::simulation::results;
use crate::strategy::equilibrium;
use crate::strategy::implementations::{
    RandomPricing, RandomQuantity, ScriptedPricing, ScriptedQuantity,
};
use crate::strategy::traits::{PricingPolicy, QuantityPolicy};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two-player Bertrand and Cournot duopoly simulator
#[derive(Parser, Debug)]
#[command(name = "duopoly-games", version, about)]
struct Args {
    /// JSON file overriding the default game constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand, Debug)]
enum Game {
    /// Price competition with investment-driven cost cuts
    Bertrand(RunArgs),
    /// Quantity competition (the lemonade stand game)
    Cournot {
        #[command(flatten)]
        run: RunArgs,

        /// Also export the best-response curve to this CSV file
        #[arg(long)]
        curve_out: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Number of rounds (defaults to the config, or the script length)
    #[arg(long)]
    rounds: Option<usize>,

    #[arg(long, value_enum, default_value_t = Mode::Random)]
    mode: Mode,

    /// CSV file with one row of inputs per round (script mode)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed for random mode; player 2 uses seed + 1
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Export the results table to this CSV file
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Random,
    Script,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    match args.game {
        Game::Bertrand(run) => run_bertrand(config, run),
        Game::Cournot { run, curve_out } => run_cournot(config, run, curve_out),
    }
}

fn run_bertrand(config: GameConfig, run: RunArgs) -> Result<()> {
    println!("=== Bertrand Model Game Theory Simulator ===");

    // 1. SETUP CONFIGURATION AND INPUTS
    let mut cfg = config.bertrand;
    let policies: [Box<dyn PricingPolicy>; 2] = match run.mode {
        Mode::Random => [
            Box::new(RandomPricing::new(run.seed)),
            Box::new(RandomPricing::new(run.seed.wrapping_add(1))),
        ],
        Mode::Script => {
            let Some(path) = &run.script else {
                bail!("--mode script needs --script <FILE>");
            };
            let rows = inputs::load_bertrand_script(path)
                .with_context(|| format!("loading script {}", path.display()))?;
            cfg.rounds = rows.len();
            let [p1, p2] = inputs::split_bertrand_script(&rows);
            [
                Box::new(ScriptedPricing::new(p1)),
                Box::new(ScriptedPricing::new(p2)),
            ]
        }
    };
    if let Some(rounds) = run.rounds {
        cfg.rounds = rounds;
    }
    cfg.validate()?;

    // 2. RUN SIMULATION
    info!(rounds = cfg.rounds, mode = ?run.mode, "starting bertrand session");
    let mut sim = BertrandSimulation::new(cfg, policies);
    // A rejected input ends the session; what was played is still reported
    let finished = sim.run();

    for outcome in &sim.history {
        println!("Round {}", outcome.round);
        for (k, firm) in outcome.firms.iter().enumerate() {
            println!(
                "  Player {} sold {} units. Profit: ${:.2}",
                k + 1,
                firm.units_sold,
                firm.profit
            );
        }
    }

    // 3. RESULTS
    let rows = results::bertrand_rows(&sim.market);
    if let Some(path) = &run.out {
        reporting::write_csv_file(path, &rows)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Results written to {}", path.display());
    }

    let [f1, f2] = &sim.market.firms;
    if let Some(i) = equilibrium::peak_joint_profit_round(&f1.profits, &f2.profits) {
        println!(
            "\nHighest joint profit in round {}: prices {:.2} / {:.2}",
            i + 1,
            f1.prices[i],
            f2.prices[i]
        );
    }

    println!("\n=== Final Results ===");
    for standing in results::bertrand_standings(&sim.market) {
        println!(
            "{}: Capital: ${:.2} | Production Cost: ${:.2} | Total Profit: ${:.2}",
            standing.name, standing.capital, standing.production_cost, standing.total_profit
        );
    }

    finished.with_context(|| format!("simulation stopped after {} rounds", sim.history.len()))
}

fn run_cournot(config: GameConfig, run: RunArgs, curve_out: Option<PathBuf>) -> Result<()> {
    println!("=== Lemonade Stand Game Simulator ===");

    // 1. SETUP CONFIGURATION AND INPUTS
    let mut cfg = config.cournot;
    let policies: [Box<dyn QuantityPolicy>; 2] = match run.mode {
        Mode::Random => [
            Box::new(RandomQuantity::new(run.seed)),
            Box::new(RandomQuantity::new(run.seed.wrapping_add(1))),
        ],
        Mode::Script => {
            let Some(path) = &run.script else {
                bail!("--mode script needs --script <FILE>");
            };
            let rows = inputs::load_cournot_script(path)
                .with_context(|| format!("loading script {}", path.display()))?;
            cfg.num_rounds = rows.len();
            let [q1, q2] = inputs::split_cournot_script(&rows);
            [
                Box::new(ScriptedQuantity::new(q1)),
                Box::new(ScriptedQuantity::new(q2)),
            ]
        }
    };
    if let Some(rounds) = run.rounds {
        cfg.num_rounds = rounds;
    }
    cfg.validate()?;

    // 2. RUN SIMULATION
    info!(rounds = cfg.num_rounds, mode = ?run.mode, "starting cournot session");
    let mut sim = CournotSimulation::new(cfg, policies);
    let finished = sim.run();

    for (i, outcome) in sim.history.iter().enumerate() {
        println!(
            "Round {}: cups {} / {} | Price per cup: ${:.2} | Profits: ${:.2} / ${:.2}",
            i + 1,
            outcome.q1,
            outcome.q2,
            outcome.price,
            outcome.profit1,
            outcome.profit2
        );
    }

    // 3. RESULTS
    let rows = results::cournot_rows(&sim.market);
    if let Some(path) = &run.out {
        reporting::write_csv_file(path, &rows)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Results written to {}", path.display());
    }
    if let Some(path) = &curve_out {
        let curve = equilibrium::best_response_curve(&sim.market, 100);
        reporting::write_csv_file(path, &curve)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Best-response curve written to {}", path.display());
    }

    println!("\n=== Final Results ===");
    for (k, summary) in results::cournot_summary(&rows).iter().enumerate() {
        println!(
            "Player {}: Total Profit: ${:.2} | Average Profit: ${:.2}",
            k + 1,
            summary.total_profit,
            summary.average_profit
        );
    }

    println!("\nNash equilibrium quantity: {:.3} cups each", sim.market.nash_quantity());
    println!("Best response: {}", equilibrium::best_response_equation(&sim.market));

    finished.with_context(|| format!("simulation stopped after {} rounds", sim.history.len()))
}
