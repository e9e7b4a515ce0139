#![no_main]

use libfuzzer_sys::fuzz_target;
use perlenbilanz::core::{DocumentKind, aggregate};
use perlenbilanz::input::{RawLineItem, load_lines};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = serde_json::from_slice::<Vec<RawLineItem>>(data) else {
        return;
    };
    if let Ok(lines) = load_lines(DocumentKind::Sale, raw) {
        let totals = aggregate(&lines);
        assert_eq!(totals.net_total + totals.vat_total, totals.gross_total);
    }
});
