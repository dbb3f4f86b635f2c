//! Numeric conversion helpers centralizing money and quantity casts.

use num_traits::cast::cast;

/// Format integer cents as a dollar amount with thousands separators.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, ch) in dollars.chars().enumerate() {
        if idx > 0 && (dollars.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", abs % 100)
}

/// Scale a cent amount by a factor, rounding up and returning 0 for non-finite factors.
#[must_use]
pub fn scale_cents(cents: i64, factor: f32) -> i64 {
    if !factor.is_finite() {
        return 0;
    }
    let scaled = i64_to_f64(cents) * f64::from(factor);
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    cast::<f64, i64>(scaled.clamp(min, max).ceil()).unwrap_or(0)
}

/// Take a fraction of a quantity, rounding down and clamping the fraction to `0.0..=1.0`.
#[must_use]
pub fn fraction_of(quantity: u32, fraction: f32) -> u32 {
    if !fraction.is_finite() {
        return 0;
    }
    let portion = f64::from(quantity) * f64::from(fraction.clamp(0.0, 1.0));
    cast::<f64, u32>(portion.floor()).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert u32 to f32 for probability and price factors.
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    cast::<u32, f32>(value).unwrap_or(0.0)
}

/// Convert a collection length to `u32`, saturating on overflow.
#[must_use]
pub fn len_to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_format_with_grouping() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(160_000), "$1,600.00");
        assert_eq!(format_cents(123_456_789), "$1,234,567.89");
        assert_eq!(format_cents(-250), "-$2.50");
    }

    #[test]
    fn scaling_rounds_up_and_rejects_nan() {
        assert_eq!(scale_cents(1_000, 1.25), 1_250);
        assert_eq!(scale_cents(101, 0.5), 51);
        assert_eq!(scale_cents(500, f32::NAN), 0);
    }

    #[test]
    fn fractions_clamp() {
        assert_eq!(fraction_of(100, 0.25), 25);
        assert_eq!(fraction_of(100, 3.0), 100);
        assert_eq!(fraction_of(7, f32::INFINITY), 0);
    }
}
