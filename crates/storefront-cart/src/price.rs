//! Display-text prices.
//!
//! Product cards show prices the French way (`19,99 €`). The page reads
//! that text back when a card's "add to cart" button is used.

use crate::cart::is_valid_price;

/// Parse a displayed price such as `"19,99 €"` or `"€ 1.299,00"`.
///
/// Currency symbols and spaces are dropped. When a comma is present it is
/// the decimal separator and dots are thousands separators. Returns `None`
/// for empty, negative or non-finite results.
pub fn parse_display_price(text: &str) -> Option<f64> {
    if text.contains('-') {
        return None;
    }
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = if kept.contains(',') {
        kept.replace('.', "").replace(',', ".")
    } else {
        kept
    };
    if normalized.is_empty() {
        return None;
    }

    let price: f64 = normalized.parse().ok()?;
    is_valid_price(price).then_some(price)
}

/// Format a price for display: `19.99` becomes `"19,99 €"`.
pub fn format_price(price: f64) -> String {
    format!("{:.2} €", price).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_forms() {
        assert_eq!(parse_display_price("19,99 €"), Some(19.99));
        assert_eq!(parse_display_price("19,99€"), Some(19.99));
        assert_eq!(parse_display_price("€24.50"), Some(24.5));
        assert_eq!(parse_display_price("1.299,00 €"), Some(1299.0));
        assert_eq!(parse_display_price("  7 € "), Some(7.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_display_price(""), None);
        assert_eq!(parse_display_price("€"), None);
        assert_eq!(parse_display_price("free"), None);
        assert_eq!(parse_display_price("-5,00 €"), None);
        assert_eq!(parse_display_price("1,2,3"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_price(19.99), "19,99 €");
        assert_eq!(format_price(0.5), "0,50 €");
    }
}
