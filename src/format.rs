//! Currency formatting for the text summary.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Formats `number` as dollars with two decimal places and thousands
/// separators, e.g. "$1,234.50" or "-$5.00".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| currency_formatter("$"));
    let negative_fmt = NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"));

    let formatted = if number < 0.0 {
        negative_fmt
            .as_ref()
            .map(|formatter| formatter.fmt_string(number.abs()))
    } else if number > 0.0 {
        positive_fmt
            .as_ref()
            .map(|formatter| formatter.fmt_string(number))
    } else {
        // numfmt renders zero as "0".
        return "$0.00".to_owned();
    };

    match formatted {
        Some(formatted) => pad_cents(formatted),
        None => format!("{}${:.2}", if number < 0.0 { "-" } else { "" }, number.abs()),
    }
}

fn currency_formatter(prefix: &str) -> Option<Formatter> {
    Formatter::currency(prefix)
        .ok()
        .map(|formatter| formatter.precision(Precision::Decimals(2)))
}

/// numfmt drops trailing zeros from the cents, so "12.30" comes out as
/// "12.3" and "12.00" as "12".
fn pad_cents(mut formatted: String) -> String {
    match formatted.rfind('.') {
        None => formatted.push_str(".00"),
        Some(dot) if formatted.len() - dot == 2 => formatted.push('0'),
        Some(_) => {}
    }

    formatted
}
