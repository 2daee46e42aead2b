/// Suggests the invoice number following `current` by incrementing its
/// trailing run of digits, keeping the zero padding.
///
/// Returns `None` when `current` has no numeric suffix.
pub fn next_invoice_number(current: &str) -> Option<String> {
    let current = current.trim();
    let digits = current.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let (prefix, number) = current.split_at(current.len() - digits);
    let next = number.parse::<u64>().ok()?.checked_add(1)?;
    Some(format!("{}{:0width$}", prefix, next, width = digits))
}
