// Brazilian number handling shared by the loader, the statistics and the report.
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    const CURRENCY_PREFIX: &str = "R$";

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    /// Converts a currency cell such as `"R$ 8.852.407,34"` into a number.
    ///
    /// In currency text every `.` is a thousands separator and `,` is the decimal
    /// point (`"R$ 1.234"` is 1234). Bare numeric text (`"123456"`, `"1.234"`,
    /// `"88524.07"`) is already a number and is returned as is, so feeding the
    /// output back in yields the same value. Anything that cannot be parsed
    /// becomes `None`.
    pub fn normalize_currency(raw: &str) -> Option<f64> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(value) = plain_number(&compact) {
            return Some(value);
        }

        let cleaned: String = compact
            .replace(CURRENCY_PREFIX, "")
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(*c, '.' | ',' | '-'))
            .collect();
        parse_decimal(&cleaned).ok()
    }

    fn plain_number(s: &str) -> Option<f64> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };
        if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if let Some(frac) = frac_part {
            if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
        }
        f64::from_str(s).ok()
    }

    /// `1234.5` -> `"R$1.234,50"`.
    pub fn format_currency(value: f64) -> String {
        format_with_decimals(value, 2)
    }

    /// Whole-real variant used for chart labels: `1234.6` -> `"R$1.235"`.
    pub fn format_currency_whole(value: f64) -> String {
        format_with_decimals(value, 0)
    }

    /// Formats text that holds a number; anything else is returned unchanged.
    pub fn format_currency_text(text: &str) -> String {
        match f64::from_str(text.trim()) {
            Ok(value) if value.is_finite() => format_currency(value),
            _ => text.to_string(),
        }
    }

    /// Report cell for a statistic that may have no value.
    pub fn format_optional(value: Option<f64>) -> String {
        match value {
            Some(v) => format_currency_text(&v.to_string()),
            None => format_currency_text("N/A"),
        }
    }

    fn format_with_decimals(value: f64, decimals: usize) -> String {
        let fixed = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };
        let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

        let mut out = String::from(CURRENCY_PREFIX);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part));
        if let Some(frac) = frac_part {
            out.push(',');
            out.push_str(frac);
        }
        out
    }

    fn group_thousands(digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        grouped
    }

}
