//! Parsing of amounts and rates as typed into the bookkeeping forms.
//!
//! Amounts accept both German (`1.234,56`) and English (`1,234.56`) notation
//! with at most two fractional digits. The German reading wins where both
//! apply, so `1.000` is one thousand while `1.5` is one and a half.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::core::{BilanzError, VatRate};

lazy_static! {
    /// `1.000,23`, `1000,2`, `12`
    static ref AMOUNT_COMMA: Regex = Regex::new(
        r"^[+-]?[0-9]{1,3}(?:(?:\.[0-9]{3})*(?:,[0-9]{1,2})?|[0-9]*(?:,[0-9]{1,2})?)$"
    ).unwrap();

    /// `1,000.23`, `1000.2`
    static ref AMOUNT_DOT: Regex = Regex::new(
        r"^[+-]?[0-9]{1,3}(?:(?:,[0-9]{3})*(?:\.[0-9]{1,2})?|[0-9]*(?:\.[0-9]{1,2})?)$"
    ).unwrap();

    /// `19`, `-7`, `7,5`, `7.5`
    static ref RATE: Regex = Regex::new(r"^-?[0-9]+(?:[.,][0-9]+)?$").unwrap();
}

/// Parse an amount. Blank input yields `Ok(None)`.
pub fn parse_amount(input: &str) -> Result<Option<Decimal>, BilanzError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let clean = if AMOUNT_COMMA.is_match(input) {
        input.replace('.', "").replace(',', ".")
    } else if AMOUNT_DOT.is_match(input) {
        input.replace(',', "")
    } else {
        return Err(BilanzError::Parse(format!("not an amount: '{input}'")));
    };

    to_decimal(&clean).map(Some)
}

/// Parse a VAT percentage. Blank input yields `Ok(None)`.
pub fn parse_rate(input: &str) -> Result<Option<VatRate>, BilanzError> {
    parse_percent(input)?.map(VatRate::new).transpose()
}

/// A percentage without the rate domain check. `.` and `,` are both
/// decimal separators here, never thousands separators.
pub(crate) fn parse_percent(input: &str) -> Result<Option<Decimal>, BilanzError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if !RATE.is_match(input) {
        return Err(BilanzError::Parse(format!("not a VAT rate: '{input}'")));
    }
    to_decimal(&input.replace(',', ".")).map(Some)
}

fn to_decimal(clean: &str) -> Result<Decimal, BilanzError> {
    let unsigned = clean.strip_prefix('+').unwrap_or(clean);
    Decimal::from_str(unsigned)
        .map_err(|e| BilanzError::Parse(format!("'{clean}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn german_notation() {
        assert_eq!(parse_amount("1.000,23").unwrap(), Some(dec!(1000.23)));
        assert_eq!(parse_amount("12,5").unwrap(), Some(dec!(12.5)));
        assert_eq!(parse_amount("1.234.567").unwrap(), Some(dec!(1234567)));
        assert_eq!(parse_amount("-3,99").unwrap(), Some(dec!(-3.99)));
    }

    #[test]
    fn english_notation() {
        assert_eq!(parse_amount("1,000.23").unwrap(), Some(dec!(1000.23)));
        assert_eq!(parse_amount("1.5").unwrap(), Some(dec!(1.5)));
        assert_eq!(parse_amount("+42.10").unwrap(), Some(dec!(42.10)));
    }

    #[test]
    fn three_digit_groups_are_thousands() {
        assert_eq!(parse_amount("1.000").unwrap(), Some(dec!(1000)));
        assert_eq!(parse_amount("1,000").unwrap(), Some(dec!(1000)));
        assert_eq!(parse_amount("12,345").unwrap(), Some(dec!(12345)));
    }

    #[test]
    fn plain_integers() {
        assert_eq!(parse_amount("0").unwrap(), Some(dec!(0)));
        assert_eq!(parse_amount("  119 ").unwrap(), Some(dec!(119)));
        assert_eq!(parse_amount("123456").unwrap(), Some(dec!(123456)));
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(parse_amount("").unwrap(), None);
        assert_eq!(parse_amount("   ").unwrap(), None);
    }

    #[test]
    fn rejects_garbage() {
        for s in ["abc", "1,2,3", "1.2345", "1.000,234", "--1", "1e5", ","] {
            assert!(
                matches!(parse_amount(s), Err(BilanzError::Parse(_))),
                "accepted {s}"
            );
        }
    }

    #[test]
    fn rates() {
        assert_eq!(parse_rate("19").unwrap(), Some(VatRate::STANDARD));
        assert_eq!(parse_rate("7,0").unwrap(), Some(VatRate::REDUCED));
        assert_eq!(parse_rate("7.5").unwrap().unwrap().percent(), dec!(7.5));
        assert_eq!(parse_rate("7.125").unwrap().unwrap().percent(), dec!(7.125));
        assert_eq!(parse_rate("7,125").unwrap().unwrap().percent(), dec!(7.125));
        assert_eq!(parse_rate("").unwrap(), None);
        assert!(matches!(parse_rate("x"), Err(BilanzError::Parse(_))));
        assert!(matches!(parse_rate("-100"), Err(BilanzError::InvalidRate(_))));
        assert!(matches!(parse_rate("1001"), Err(BilanzError::InvalidRate(_))));
    }
}
