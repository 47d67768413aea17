//! Transaction aggregation for the dashboard.
//!
//! Reduces the filtered transactions to income/expense totals, a category
//! breakdown with top-N + "Others" bucketing, a daily timeline and a weekday
//! by category expense grid. Every chart is drawn from this one summary so
//! that totals agree across chart kinds.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};
use time::{Date, Weekday};

use crate::{config::PipelineConfig, transaction::NormalizedTransaction};

/// The default name of the synthetic entry holding the categories that did
/// not make the top-N cut.
pub const OTHERS_LABEL: &str = "Others";

/// The days of the week in display order.
pub(super) const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryEntry {
    /// The category name, or the "Others" label.
    pub name: String,
    /// The summed expense amount.
    pub amount: f64,
    /// `amount` as a percentage of total expenses.
    pub percentage: f64,
}

/// Income and expenses on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// The day, in the offset the transactions were recorded in.
    #[serde(serialize_with = "serialize_iso_date")]
    pub date: Date,
    /// Income received that day.
    pub income: f64,
    /// Expenses paid that day.
    pub expenses: f64,
}

/// Expenses for one breakdown category on one day of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayExpense {
    /// The day of the week.
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    /// A name from the category breakdown.
    pub category: String,
    /// The summed expense amount.
    pub amount: f64,
}

/// Everything the chart adapters need, computed in one pass over the
/// filtered transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of income amounts.
    pub total_income: f64,
    /// The sum of expense amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub net_amount: f64,
    /// Expense categories, largest first, with any remainder folded into a
    /// trailing "Others" entry.
    pub category_breakdown: Vec<CategorySummaryEntry>,
    /// The number of filtered transactions, including those whose amount
    /// could not be used.
    pub transaction_count: usize,
    /// Daily income and expenses in date order.
    pub timeline: Vec<TimelinePoint>,
    /// Breakdown categories by weekday, in breakdown order then Monday to
    /// Sunday.
    pub weekday_expenses: Vec<WeekdayExpense>,
}

impl Summary {
    /// Whether there were no transactions to summarize.
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// Summarizes the filtered transactions.
///
/// Transactions without a usable amount count towards `transaction_count`
/// but add nothing to any sum. The output depends only on the input, so
/// calling this twice with the same transactions gives the same summary.
pub fn summarize<'a, I>(transactions: I, config: &PipelineConfig) -> Summary
where
    I: IntoIterator<Item = &'a NormalizedTransaction>,
{
    let transactions: Vec<&NormalizedTransaction> = transactions.into_iter().collect();

    let (total_income, total_expenses) = calculate_totals(&transactions);
    let category_breakdown = calculate_category_breakdown(&transactions, total_expenses, config);
    let timeline = calculate_timeline(&transactions);
    let weekday_expenses =
        calculate_weekday_expenses(&transactions, &category_breakdown, config.top_categories);

    tracing::debug!(
        "Summarized {} transactions: income {total_income}, expenses {total_expenses}, {} categories",
        transactions.len(),
        category_breakdown.len()
    );

    Summary {
        total_income,
        total_expenses,
        net_amount: total_income - total_expenses,
        category_breakdown,
        transaction_count: transactions.len(),
        timeline,
        weekday_expenses,
    }
}

/// Sums income and expenses, skipping transactions without an amount.
///
/// # Returns
/// Tuple of (total income, total expenses).
fn calculate_totals(transactions: &[&NormalizedTransaction]) -> (f64, f64) {
    let mut income = 0.0;
    let mut expenses = 0.0;

    for transaction in transactions {
        match (transaction.amount, transaction.is_expense) {
            (Some(amount), true) => expenses += amount,
            (Some(amount), false) => income += amount,
            (None, _) => {}
        }
    }

    (income, expenses)
}

/// Groups expenses by category, largest first, keeping the top
/// `config.top_categories` and folding the rest into one "Others" entry.
///
/// Equal amounts keep the order in which their categories first appeared.
/// The "Others" entry is left out when the folded amount is exactly zero,
/// and the whole breakdown is empty when there are no expenses.
fn calculate_category_breakdown(
    transactions: &[&NormalizedTransaction],
    total_expenses: f64,
    config: &PipelineConfig,
) -> Vec<CategorySummaryEntry> {
    if total_expenses == 0.0 {
        return Vec::new();
    }

    let mut groups = group_expenses_by_category(transactions);
    // `sort_by` is stable, so ties stay in first-seen order.
    groups.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let (scale, share_total) = share_denominator(&groups, total_expenses);

    let remainder: f64 = groups
        .iter()
        .skip(config.top_categories)
        .map(|(_, amount)| amount)
        .sum();
    let scaled_remainder: f64 = groups
        .iter()
        .skip(config.top_categories)
        .map(|(_, amount)| amount / scale)
        .sum();
    let has_remainder = groups.len() > config.top_categories;
    groups.truncate(config.top_categories);

    let mut breakdown: Vec<CategorySummaryEntry> = groups
        .into_iter()
        .map(|(name, amount)| CategorySummaryEntry {
            name: name.to_owned(),
            amount,
            percentage: percentage_of(amount / scale, share_total),
        })
        .collect();

    if has_remainder && remainder != 0.0 {
        breakdown.push(CategorySummaryEntry {
            name: config.others_label.clone(),
            amount: remainder,
            percentage: percentage_of(scaled_remainder, share_total),
        });
    }

    breakdown
}

/// Sums expense amounts per category in order of first appearance.
fn group_expenses_by_category<'a>(
    transactions: &[&'a NormalizedTransaction],
) -> Vec<(&'a str, f64)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.is_expense) {
        let Some(amount) = transaction.amount else {
            continue;
        };

        let category = transaction.category.as_str();
        match positions.get(category) {
            Some(&index) => groups[index].1 += amount,
            None => {
                positions.insert(category, groups.len());
                groups.push((category, amount));
            }
        }
    }

    groups
}

/// The scale and total that category shares are computed against.
///
/// Normally `(1.0, total_expenses)`. When finite group amounts add up past
/// `f64::MAX`, every amount is divided by the largest one first so the shares
/// still sum to 100. Group amounts that are themselves infinite are out of
/// range and give 0 % shares.
fn share_denominator(groups: &[(&str, f64)], total_expenses: f64) -> (f64, f64) {
    if total_expenses.is_finite() {
        return (1.0, total_expenses);
    }

    let largest = groups
        .iter()
        .map(|(_, amount)| amount.abs())
        .fold(0.0, f64::max);
    if largest == 0.0 || !largest.is_finite() {
        return (1.0, total_expenses);
    }

    (largest, groups.iter().map(|(_, amount)| amount / largest).sum())
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        amount / total * 100.0
    }
}

/// Sums income and expenses per calendar day.
///
/// Only transactions with both an amount and a readable date are placed on
/// the timeline.
fn calculate_timeline(transactions: &[&NormalizedTransaction]) -> Vec<TimelinePoint> {
    let mut totals_by_day: BTreeMap<Date, (f64, f64)> = BTreeMap::new();

    for transaction in transactions {
        let (Some(amount), Some(date)) = (transaction.amount, transaction.timestamp.date()) else {
            continue;
        };

        let totals = totals_by_day.entry(date).or_insert((0.0, 0.0));
        if transaction.is_expense {
            totals.1 += amount;
        } else {
            totals.0 += amount;
        }
    }

    totals_by_day
        .into_iter()
        .map(|(date, (income, expenses))| TimelinePoint {
            date,
            income,
            expenses,
        })
        .collect()
}

/// Builds a dense grid of expenses per breakdown category and weekday.
///
/// The first `top_categories` breakdown entries are real categories. Any
/// entry after them is the remainder row, which collects every category that
/// was folded away, even one whose name matches the remainder label.
/// Transactions without a readable date are left out.
fn calculate_weekday_expenses(
    transactions: &[&NormalizedTransaction],
    breakdown: &[CategorySummaryEntry],
    top_categories: usize,
) -> Vec<WeekdayExpense> {
    if breakdown.is_empty() {
        return Vec::new();
    }

    let kept_rows = breakdown.len().min(top_categories);
    let rows: HashMap<&str, usize> = breakdown[..kept_rows]
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.name.as_str(), index))
        .collect();
    let others_row = (breakdown.len() > kept_rows).then_some(kept_rows);

    let mut grid = vec![[0.0_f64; 7]; breakdown.len()];

    for transaction in transactions.iter().filter(|t| t.is_expense) {
        let (Some(amount), Some(date)) = (transaction.amount, transaction.timestamp.date()) else {
            continue;
        };

        let row = rows.get(transaction.category.as_str()).copied().or(others_row);
        if let Some(row) = row {
            let column = date.weekday().number_days_from_monday() as usize;
            grid[row][column] += amount;
        }
    }

    breakdown
        .iter()
        .zip(grid)
        .flat_map(|(entry, amounts)| {
            WEEKDAYS
                .into_iter()
                .zip(amounts)
                .map(move |(weekday, amount)| WeekdayExpense {
                    weekday,
                    category: entry.name.clone(),
                    amount,
                })
        })
        .collect()
}

/// Three-letter weekday abbreviation, e.g. "Mon".
pub(super) fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn serialize_iso_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

fn serialize_weekday<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_label(*weekday))
}
