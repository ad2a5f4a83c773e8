use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use fundlens::engine::{KeyAmount, TrendMetric, TrendPoint, YearAmount};
use fundlens::view::{self, InvestorView, OverallView, StartupView};
use fundlens::{FundingDataset, FundingEvent};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal dashboard over a cleaned startup-funding CSV"
)]
struct Args {
    /// Path to the funding CSV.
    #[arg(long, global = true, default_value = "startup_cleaned.csv")]
    data: PathBuf,
    /// Emit the selected view as one JSON document instead of tables.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Whole-dataset analysis.
    Overall {
        /// Metric for the month-over-month trend.
        #[arg(long, value_enum, default_value_t = MetricArg::Total)]
        metric: MetricArg,
    },
    /// Drill into one startup by exact name.
    Startup { name: String },
    /// Drill into one investor; matches any row naming them.
    Investor { name: String },
    /// Print a selector list.
    List {
        #[arg(value_enum)]
        what: ListArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    Total,
    Count,
}

impl From<MetricArg> for TrendMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Total => TrendMetric::Total,
            MetricArg::Count => TrendMetric::Count,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListArg {
    Startups,
    Investors,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for tables and JSON.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let dataset = FundingDataset::load(&args.data)
        .with_context(|| format!("loading funding data from {}", args.data.display()))?;
    info!(
        rows = dataset.len(),
        null_dates = dataset.report().null_dates,
        null_amounts = dataset.report().null_amounts,
        "dataset ready"
    );

    if dataset.is_empty() {
        if args.json {
            println!("null");
        } else {
            println!("No funding rows in {}; nothing to analyze.", args.data.display());
        }
        return Ok(());
    }

    match args.mode {
        Mode::Overall { metric } => {
            let view = view::overall(&dataset, metric.into());
            if args.json {
                print_json(&view)?;
            } else {
                print_overall(&view);
            }
        }
        Mode::Startup { name } => match view::startup(&dataset, &name) {
            Some(view) if args.json => print_json(&view)?,
            Some(view) => print_startup(&view),
            None => no_data(&name, args.json),
        },
        Mode::Investor { name } => match view::investor(&dataset, &name) {
            Some(view) if args.json => print_json(&view)?,
            Some(view) => print_investor(&view),
            None => no_data(&name, args.json),
        },
        Mode::List { what } => {
            let names = match what {
                ListArg::Startups => dataset.startups(),
                ListArg::Investors => dataset.investors(),
            };
            if args.json {
                print_json(&names)?;
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
    }

    Ok(())
}

fn no_data(name: &str, json: bool) {
    warn!(name = %name, "no rows matched");
    if json {
        println!("null");
    } else {
        println!("No rows matched `{name}`.");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing view to JSON")?;
    println!("{text}");
    Ok(())
}

fn print_overall(view: &OverallView) {
    println!("\n--- Overall Analysis ---");
    println!("Total funding:    {:.0} Cr", view.summary.total_amount);
    match &view.summary.top_startup {
        Some(top) => println!("Largest round:    {} ({:.2} Cr)", top.key, top.amount),
        None => println!("Largest round:    n/a"),
    }
    println!("Avg per startup:  {:.2} Cr", view.summary.avg_per_startup);
    println!("Funded rounds:    {}", view.summary.funded_round_count);
    println!("Startups tracked: {}", view.summary.distinct_startups);

    print_trend_table("Month over Month", view.metric, &view.trend);
    print_key_amount_table("Top Startups", "Startup", &view.top_startups);
    print_key_amount_table("Sector Totals", "Sector", &view.sectors);
}

fn print_startup(view: &StartupView) {
    println!("\n--- {} ---", view.startup);
    println!("Total raised:  {:.2} Cr", view.metrics.total_amount);
    match view.metrics.max_amount {
        Some(max) => println!("Biggest round: {max:.2} Cr"),
        None => println!("Biggest round: n/a"),
    }
    match view.metrics.mean_amount {
        Some(mean) => println!("Mean round:    {mean:.2} Cr"),
        None => println!("Mean round:    n/a"),
    }
    println!("Rounds:        {}", view.metrics.round_count);

    print_trend_table("Month over Month", TrendMetric::Total, &view.trend);
    print_key_amount_table("Rounds", "Round", &view.rounds);
    print_key_amount_table("Cities", "City", &view.cities);
    print_key_amount_table("Top Investors", "Investor", &view.top_investors);
    print_year_table("Year over Year", &view.yearly);
}

fn print_investor(view: &InvestorView) {
    println!("\n--- {} ---", view.investor);
    print_recent_table(&view.recent);
    print_key_amount_table("Biggest Investments", "Startup", &view.top_startups);
    print_key_amount_table("Sectors Invested In", "Sector", &view.sectors);
    print_year_table("Year over Year", &view.yearly);
}

fn print_trend_table(title: &str, metric: TrendMetric, points: &[TrendPoint]) {
    let value_header = match metric {
        TrendMetric::Total => "Total (Cr)",
        TrendMetric::Count => "Rounds",
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Month").style_spec("bFg"),
        Cell::new(value_header).style_spec("bFg"),
    ]));
    for point in points {
        let value = match metric {
            TrendMetric::Total => format!("{:.2}", point.value),
            TrendMetric::Count => format!("{:.0}", point.value),
        };
        table.add_row(Row::new(vec![
            Cell::new(&point.label),
            Cell::new(&value).style_spec("r"),
        ]));
    }
    println!("\n--- {title} ---");
    table.printstd();
}

fn print_key_amount_table(title: &str, key_header: &str, rows: &[KeyAmount]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new(key_header).style_spec("bFg"),
        Cell::new("Amount (Cr)").style_spec("bFg"),
    ]));
    for row in rows {
        table.add_row(Row::new(vec![
            Cell::new(&row.key),
            Cell::new(&format!("{:.2}", row.amount)).style_spec("r"),
        ]));
    }
    println!("\n--- {title} ---");
    table.printstd();
}

fn print_year_table(title: &str, rows: &[YearAmount]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Year").style_spec("bFg"),
        Cell::new("Amount (Cr)").style_spec("bFg"),
    ]));
    for row in rows {
        table.add_row(Row::new(vec![
            Cell::new(&row.year.to_string()),
            Cell::new(&format!("{:.2}", row.amount)).style_spec("r"),
        ]));
    }
    println!("\n--- {title} ---");
    table.printstd();
}

fn print_recent_table(events: &[FundingEvent]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Date").style_spec("bFg"),
        Cell::new("Startup").style_spec("bFg"),
        Cell::new("Vertical").style_spec("bFg"),
        Cell::new("City").style_spec("bFg"),
        Cell::new("Round").style_spec("bFg"),
        Cell::new("Amount (Cr)").style_spec("bFg"),
    ]));
    for event in events {
        let date = match event.date {
            Some(d) => d.format("%d-%m-%Y").to_string(),
            None => "-".to_string(),
        };
        let amount = match event.amount_cr {
            Some(a) => format!("{a:.2}"),
            None => "-".to_string(),
        };
        table.add_row(Row::new(vec![
            Cell::new(&date),
            Cell::new(&event.startup),
            Cell::new(event.vertical.as_deref().unwrap_or("-")),
            Cell::new(event.city.as_deref().unwrap_or("-")),
            Cell::new(event.round.as_deref().unwrap_or("-")),
            Cell::new(&amount).style_spec("r"),
        ]));
    }
    println!("\n--- Most Recent Rounds ---");
    table.printstd();
}
