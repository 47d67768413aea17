//! Command line front end: summarizes a transaction export for a chosen
//! period and set of categories, printing text or JSON.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use time::{
    Date, OffsetDateTime,
    format_description::BorrowedFormatItem,
    macros::{format_description, time},
};

use expense_insights::{
    DashboardData, Error, FilterOptions, PipelineConfig, TimePeriod, default_filters,
    format_currency, get_local_offset, load_filters, load_pipeline_config, load_transactions,
    now_in_timezone, parse_timestamp, run_pipeline, setup_logging,
};

const DATE_ONLY: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Summarizes a transaction export into dashboard totals and chart data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with an array of transactions, or an object with a
    /// `transactions` array.
    #[arg(long)]
    transactions: PathBuf,

    /// JSON file with the filter settings to start from.
    #[arg(long)]
    filters: Option<PathBuf>,

    /// Time period to filter by: day, week, month, year, custom or all.
    #[arg(long)]
    period: Option<TimePeriod>,

    /// First day (YYYY-MM-DD) or instant (RFC 3339) to include. Switches to a
    /// custom period.
    #[arg(long)]
    start: Option<String>,

    /// Last day (YYYY-MM-DD) or instant (RFC 3339) to include. Switches to a
    /// custom period.
    #[arg(long)]
    end: Option<String>,

    /// Only include this category. May be given more than once.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// The instant periods are relative to, as an RFC 3339 timestamp.
    /// Defaults to the current time.
    #[arg(long)]
    now: Option<String>,

    /// IANA timezone, e.g. "Pacific/Auckland", that day boundaries are
    /// computed in. Defaults to the system timezone.
    #[arg(long)]
    timezone: Option<String>,

    /// JSON file with pipeline settings such as the number of top
    /// categories.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log more detail. Repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let args = Args::parse();

    setup_logging(args.verbose);

    if let Err(error) = run(&args) {
        tracing::error!("{error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let now = resolve_now(args)?;
    let config = match &args.config {
        Some(path) => load_pipeline_config(path)?,
        None => PipelineConfig::default(),
    };
    let filters = build_filters(args, now)?;
    let transactions = load_transactions(&args.transactions)?;

    tracing::info!(
        "Filtering by {} ({} categories selected) as of {now}",
        filters.time_period.label(),
        filters.categories.len()
    );

    let data = run_pipeline(&transactions, &filters, &config);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&data)
                .map_err(|error| Error::WriteOutput(error.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Text => print_text_summary(&data, &filters),
    }

    Ok(())
}

fn resolve_now(args: &Args) -> Result<OffsetDateTime, Error> {
    let Some(text) = &args.now else {
        return now_in_timezone(args.timezone.as_deref());
    };

    let now = parse_timestamp(text).ok_or_else(|| Error::InvalidDate(text.clone()))?;

    match &args.timezone {
        Some(timezone) => Ok(now.to_offset(get_local_offset(timezone)?)),
        None => Ok(now),
    }
}

/// Starts from the filter file, or the defaults, then applies the command
/// line overrides in the order a user would click through the filter UI.
fn build_filters(args: &Args, now: OffsetDateTime) -> Result<FilterOptions, Error> {
    let mut filters = match &args.filters {
        Some(path) => load_filters(path)?,
        None => default_filters(),
    };

    if let Some(period) = args.period {
        filters.select_period(period, now);
    }

    if let Some(start) = &args.start {
        filters.set_start_date(parse_bound(start, now, false)?);
    }

    if let Some(end) = &args.end {
        filters.set_end_date(parse_bound(end, now, true)?);
    }

    for category in &args.categories {
        filters.categories.insert(category.clone());
    }

    Ok(filters.resolved(now))
}

/// Parses a date argument. A bare date covers the whole day in the offset of
/// `now`, so `--end 2024-01-31` includes the 31st.
fn parse_bound(text: &str, now: OffsetDateTime, is_end: bool) -> Result<OffsetDateTime, Error> {
    if let Ok(date) = Date::parse(text.trim(), DATE_ONLY) {
        let date_time = if is_end {
            date.with_time(time!(23:59:59.999))
        } else {
            date.midnight()
        };
        return Ok(date_time.assume_offset(now.offset()));
    }

    parse_timestamp(text).ok_or_else(|| Error::InvalidDate(text.to_owned()))
}

fn print_text_summary(data: &DashboardData, filters: &FilterOptions) {
    let summary = &data.summary;

    match (filters.start_date, filters.end_date) {
        (Some(start), Some(end)) => println!(
            "Period:        {} ({} to {})",
            filters.time_period.label(),
            start.date(),
            end.date()
        ),
        _ => println!("Period:        {}", filters.time_period.label()),
    }

    if !filters.categories.is_empty() {
        let categories: Vec<&str> = filters.categories.iter().map(String::as_str).collect();
        println!("Categories:    {}", categories.join(", "));
    }

    println!("Transactions:  {}", summary.transaction_count);
    println!("Income:        {}", format_currency(summary.total_income));
    println!("Expenses:      {}", format_currency(summary.total_expenses));
    println!("Net:           {}", format_currency(summary.net_amount));

    if !summary.category_breakdown.is_empty() {
        println!();
        println!("Spending by category:");

        let name_width = summary
            .category_breakdown
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0);

        for entry in &summary.category_breakdown {
            println!(
                "  {:<name_width$}  {:>12}  {:>5.1}%",
                entry.name,
                format_currency(entry.amount),
                entry.percentage
            );
        }
    }

    if !data.available_charts.is_empty() {
        let charts: Vec<&str> = data
            .available_charts
            .iter()
            .map(|kind| kind.label())
            .collect();
        println!();
        println!("Charts:        {}", charts.join(", "));
    }
}
