use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to cents, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal rendering used for totals, e.g. `39.00`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

/// Currency rendering used in table cells, e.g. `$10.00`.
pub fn format_money(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}
