use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Express `amount` of smallest units in whole units of an asset with `decimals` places.
/// Exact: the integer digits are kept and only the scale changes.
pub fn decimalize<A: Into<BigInt>>(amount: A, decimals: u32) -> BigDecimal {
    BigDecimal::new(amount.into(), i64::from(decimals))
}

/// Read decimal places from their textual form (e.g. the EIP-4 decimals register).
/// Leading whitespace and a `+` sign are skipped, then digits are read up to the first
/// non-digit. No digits, a negative sign or an overflowing value give `None`.
pub fn parse_decimals(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<u32>().ok()
}
