//! Currency formatting for display

use rust_decimal::{Decimal, RoundingStrategy};

/// Display prefix for money values
pub const CURRENCY_PREFIX: &str = "R$";

/// Format an amount with exactly two decimal places, no prefix
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Format an amount as currency, e.g. `R$ 1234.56`
pub fn format_currency(value: Decimal) -> String {
    format!("{} {}", CURRENCY_PREFIX, format_amount(value))
}
