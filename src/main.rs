use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use funding_insights::dashboard::{Dashboard, DashboardViews, DEFAULT_TOP_INVESTORS};
use funding_insights::data::cache::SourceCache;
use funding_insights::data::model::{DealTable, SummaryTable};

/// Filtered aggregate views over a startup-funding deals table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Deals file (.csv or .json)
    #[arg(default_value = "funding_data.csv")]
    path: PathBuf,

    /// Lower bound of the year range (inclusive)
    #[arg(long)]
    year_min: Option<i32>,

    /// Upper bound of the year range (inclusive)
    #[arg(long)]
    year_max: Option<i32>,

    /// Restrict to a country (repeatable)
    #[arg(long = "country", value_name = "NAME")]
    countries: Vec<String>,

    /// Restrict to an industry (repeatable)
    #[arg(long = "industry", value_name = "NAME")]
    industries: Vec<String>,

    /// Size of the investor leaderboard
    #[arg(long, default_value_t = DEFAULT_TOP_INVESTORS)]
    top_investors: usize,

    /// Emit the views as pretty JSON instead of text tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut cache = SourceCache::new();
    let table = cache
        .get_or_load(&cli.path)
        .with_context(|| format!("loading {}", cli.path.display()))?;

    if let Some(warning) = cache.schema_warning() {
        log::warn!("{warning}");
        eprintln!("Warning: {warning}");
    }
    log::info!("loaded {} deals from {}", table.len(), cli.path.display());

    let mut dashboard = Dashboard::default();
    dashboard.set_table((*table).clone());

    // Command-line filters on top of the table's full span.
    if let Some(year) = cli.year_min {
        dashboard.spec.year_min = year;
    }
    if let Some(year) = cli.year_max {
        dashboard.spec.year_max = year;
    }
    dashboard.spec.countries = cli.countries.into_iter().collect();
    dashboard.spec.industries = cli.industries.into_iter().collect();
    dashboard.investor_limit = cli.top_investors;
    dashboard.recompute();

    let views = dashboard.views.as_ref().context("no table loaded")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(views)?);
        return Ok(());
    }

    render_text(&table, views, dashboard.investor_limit);
    Ok(())
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

fn render_text(table: &DealTable, views: &DashboardViews, investor_limit: usize) {
    println!(
        "Dataset preview (first {} of {} deals)",
        table.len().min(5),
        table.len()
    );
    for deal in table.deals.iter().take(5) {
        println!(
            "  {:>4}  {:<14}  {:<12}  {:<24}  {:>8.1}",
            deal.year, deal.country, deal.industry, deal.investor, deal.amount
        );
    }

    println!();
    println!(
        "Showing {} deals from {} to {}",
        views.deal_count, views.year_range.0, views.year_range.1
    );

    print_view("Total funding by country", &views.by_country, "country funding");
    print_view("Top industries by funding", &views.by_industry, "industry");
    print_view(
        &format!("Top {investor_limit} investors"),
        &views.top_investors,
        "investor",
    );
    print_view("Funding growth over time", &views.timeline, "time-series");
}

fn print_view(title: &str, summary: &SummaryTable, noun: &str) {
    println!();
    println!("{title}");
    if summary.is_empty() {
        println!("  No {noun} data to show for the selected filters.");
        return;
    }

    let width = summary
        .rows
        .iter()
        .map(|r| r.key.to_string().len())
        .max()
        .unwrap_or(0);
    for row in &summary.rows {
        println!("  {:<width$}  {:>10.1}", row.key.to_string(), row.total);
    }
}
