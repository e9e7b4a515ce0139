//! # perlenbilanz
//!
//! Bookkeeping of purchases (Einkauf) and sales (Verkauf) of handcrafted
//! goods: positions, MwSt splitting, VAT groups and document totals.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Positions keep full precision; rounding to cents happens once per VAT
//! group and once more for the document totals.
//!
//! ## Quick Start
//!
//! ```rust
//! use perlenbilanz::core::*;
//! use rust_decimal_macros::dec;
//!
//! let sale = DocumentBuilder::new(DocumentKind::Sale)
//!     .add_line(LineItemBuilder::new(ItemType::Goods)
//!         .gross(dec!(119.00)).rate(VatRate::STANDARD).build())
//!     .add_line(LineItemBuilder::new(ItemType::Goods)
//!         .gross(dec!(107.00)).rate(VatRate::REDUCED).build())
//!     .add_line(LineItemBuilder::new(ItemType::Discount)
//!         .gross(dec!(11.90)).rate(VatRate::STANDARD).build())
//!     .build()
//!     .unwrap();
//!
//! let totals = sale.totals().unwrap();
//! assert_eq!(totals.gross_total, dec!(214.10));
//! assert_eq!(totals.vat_total, dec!(24.10));
//! assert_eq!(totals.net_total, dec!(190.00));
//! assert!(validate_totals(totals).is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Positions, VAT resolver, VAT groups, documents |
//! | `input` | Loading raw stored records, German/English amount parsing |
//! | `overview` | Rollup of settled documents, open positions |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "input")]
pub mod input;

#[cfg(feature = "overview")]
pub mod overview;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
