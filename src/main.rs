//! Mortgage Sim CLI
//!
//! Command-line interface for comparing mortgage rate strategies. Rate
//! arguments are given in percent, the way lenders quote them, and converted
//! to fractions at this boundary.

use anyhow::Context;
use clap::Parser;

use mortgage_sim::{RiskLevel, SimulationParameters, SimulationResult, SimulationRunner};

#[derive(Debug, Parser)]
#[command(name = "mortgage_sim", about = "Monte Carlo comparison of Swiss mortgage rate strategies")]
struct Args {
    /// Loan principal in CHF
    #[arg(long, default_value_t = 500_000.0)]
    loan: f64,

    /// Projection horizon in years
    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Current SARON rate in percent
    #[arg(long, default_value_t = 1.0)]
    saron: f64,

    /// SARON margin in percent
    #[arg(long, default_value_t = 0.8)]
    margin: f64,

    /// 2-year fixed rate in percent
    #[arg(long, default_value_t = 1.2)]
    fixed2y: f64,

    /// 5-year fixed rate in percent
    #[arg(long, default_value_t = 1.4)]
    fixed5y: f64,

    /// 10-year fixed rate in percent
    #[arg(long, default_value_t = 1.8)]
    fixed10y: f64,

    /// Number of simulated rate paths
    #[arg(long, default_value_t = 1_000)]
    sims: usize,

    /// Mean-reversion speed of the rate process
    #[arg(long, default_value_t = 0.10)]
    reversion: f64,

    /// Annualized rate volatility in percent
    #[arg(long, default_value_t = 1.0)]
    vol: f64,

    /// Long-term mean rate in percent
    #[arg(long, default_value_t = 1.5)]
    mean: f64,

    /// Seed for reproducible runs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Args {
    fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            loan_amount: self.loan,
            projection_years: self.years,
            current_rate: self.saron / 100.0,
            margin: self.margin / 100.0,
            fixed_rate_2y: self.fixed2y / 100.0,
            fixed_rate_5y: self.fixed5y / 100.0,
            fixed_rate_10y: self.fixed10y / 100.0,
            num_simulations: self.sims,
            mean_reversion: self.reversion,
            volatility: self.vol / 100.0,
            long_term_mean: self.mean / 100.0,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let runner = SimulationRunner::new(args.to_parameters()).context("invalid parameters")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let result = runner.run(seed);

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("serializing result")?;
        println!("{}", json);
        return Ok(());
    }

    print_summary(&result, seed);
    print_detailed(&result);
    print_pairwise(&result);
    print_recommendation(&result);

    Ok(())
}

/// Format CHF amounts with the Swiss apostrophe thousands separator
fn format_chf(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\'');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn print_summary(result: &SimulationResult, seed: u64) {
    let best = result.best_strategy();

    println!("Mortgage Strategy Simulation ({} years, seed {})", result.projection_years, seed);
    println!("==============================================\n");

    println!("{:<16} {:>16} {:>14} {:>10}", "Strategy", "Median Cost", "vs. Best", "Win Prob");
    println!("{}", "-".repeat(60));

    let mut by_median: Vec<_> = result.strategies.iter().collect();
    by_median.sort_by(|a, b| a.median_cost.total_cmp(&b.median_cost));

    for strategy in by_median {
        let is_best = strategy.name == best.name;
        let vs_best = if is_best {
            "-".to_string()
        } else {
            format!("+CHF {}", format_chf(strategy.median_cost - best.median_cost))
        };
        // How often the recommended strategy beats this one
        let win_prob = if is_best {
            "-".to_string()
        } else {
            result
                .comparison(&best.name, &strategy.name)
                .map(|c| format!("{:.1}%", c.win_probability * 100.0))
                .unwrap_or_default()
        };
        println!(
            "{:<16} {:>16} {:>14} {:>10}",
            strategy.name,
            format!("CHF {}", format_chf(strategy.median_cost)),
            vs_best,
            win_prob
        );
    }
    println!();
}

fn print_detailed(result: &SimulationResult) {
    println!(
        "{:<16} {:>13} {:>13} {:>13} {:>13} {:>8}",
        "Strategy", "Median", "Mean", "P10", "P90", "Risk"
    );
    println!("{}", "-".repeat(80));

    for strategy in &result.strategies {
        println!(
            "{:<16} {:>13} {:>13} {:>13} {:>13} {:>7.1}%",
            strategy.name,
            format_chf(strategy.median_cost),
            format_chf(strategy.mean_cost),
            format_chf(strategy.percentile_10),
            format_chf(strategy.percentile_90),
            strategy.relative_risk_range() * 100.0
        );
    }
    println!();
}

fn print_pairwise(result: &SimulationResult) {
    println!("Pairwise win probabilities (row beats column):");
    print!("{:<16}", "");
    for strategy in &result.strategies {
        print!(" {:>15}", strategy.name);
    }
    println!();

    for row in &result.strategies {
        print!("{:<16}", row.name);
        for col in &result.strategies {
            if row.name == col.name {
                print!(" {:>15}", "-");
            } else {
                let cell = result
                    .comparison(&row.name, &col.name)
                    .map(|c| format!("{:.1}%", c.win_probability * 100.0))
                    .unwrap_or_default();
                print!(" {:>15}", cell);
            }
        }
        println!();
    }
    println!();
}

fn print_recommendation(result: &SimulationResult) {
    let best = result.best_strategy();
    println!(
        "Recommendation: {} has the highest probability of being the most \
         cost-effective option over {} years.",
        best.name, result.projection_years
    );

    match result.variable_risk_level() {
        Some(RiskLevel::High) => println!(
            "Risk assessment: the variable strategy has high uncertainty; \
             if you prefer predictable payments, consider a fixed rate despite \
             the potentially higher cost."
        ),
        Some(RiskLevel::Moderate) => println!(
            "Risk assessment: the variable strategy has moderate uncertainty; \
             weigh your risk tolerance when deciding between variable and fixed."
        ),
        Some(RiskLevel::Low) => println!(
            "Risk assessment: projected rate uncertainty is low; the variable \
             strategy presents a reasonable risk profile."
        ),
        None => {}
    }
}
