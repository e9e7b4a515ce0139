//! Loading stored position records and parsing typed-in amounts.
//!
//! # Example
//!
//! ```
//! use perlenbilanz::core::*;
//! use perlenbilanz::input::*;
//! use rust_decimal_macros::dec;
//!
//! // A legacy record: blank rate, VAT amount recorded at entry time.
//! let raw = RawLineItem {
//!     gross: RawAmount::from_text("119,00"),
//!     rate: RawAmount::Blank,
//!     legacy_vat: RawAmount::Value(dec!(19)),
//!     ..Default::default()
//! };
//! let item = raw.into_line_item(DocumentKind::Sale).unwrap();
//! assert_eq!(item.vat_mode, VatMode::LegacyPrecomputed(dec!(19)));
//! assert_eq!(item.net, Some(dec!(100)));
//! ```

mod amount;
mod raw;

pub use amount::{parse_amount, parse_rate};
pub use raw::{RawAmount, RawLineItem, load_lines};
