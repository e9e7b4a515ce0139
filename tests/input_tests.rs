#![cfg(feature = "input")]

use chrono::NaiveDate;
use perlenbilanz::core::*;
use perlenbilanz::input::*;
use rust_decimal_macros::dec;

fn parse(json: &str) -> RawLineItem {
    serde_json::from_str(json).unwrap()
}

// --- Field classification ---

#[test]
fn missing_null_blank_and_number_are_distinct() {
    let r = parse(r#"{"mwstProzent": null}"#);
    assert_eq!(r.rate, RawAmount::Null);
    assert_eq!(r.gross, RawAmount::Absent);

    let r = parse(r#"{"mwstProzent": ""}"#);
    assert_eq!(r.rate, RawAmount::Blank);

    let r = parse(r#"{"mwstProzent": 0}"#);
    assert_eq!(r.rate, RawAmount::Value(dec!(0)));

    let r = parse(r#"{"brutto": 119.5}"#);
    assert_eq!(r.gross, RawAmount::Value(dec!(119.5)));

    let r = parse(r#"{"brutto": "1.234,56"}"#);
    assert_eq!(r.gross, RawAmount::Value(dec!(1234.56)));

    let r = parse(r#"{"brutto": "viel"}"#);
    assert_eq!(r.gross, RawAmount::Invalid("viel".into()));
}

// --- Mode resolution on stored records ---

#[test]
fn current_record_with_rate() {
    let item = parse(
        r#"{"datum":"2013-05-14","typ":"Ware","bezeichnung":"Perlen","stueck":3,
            "brutto":107,"mwstProzent":7,"geliefert":true}"#,
    )
    .into_line_item(DocumentKind::Sale)
    .unwrap();
    assert_eq!(item.date, NaiveDate::from_ymd_opt(2013, 5, 14));
    assert_eq!(item.description, "Perlen");
    assert_eq!(item.quantity, Some(3));
    assert!(item.delivered);
    assert_eq!(item.vat_mode, VatMode::ExplicitRate(VatRate::REDUCED));
    assert_eq!(item.net, Some(dec!(100)));
    assert_eq!(item.vat, Some(dec!(7)));
}

#[test]
fn legacy_record_with_precomputed_vat() {
    let item = parse(r#"{"typ":"Ware","brutto":119,"mwstProzent":"","mwst":19,"mwstStatus":true}"#)
        .into_line_item(DocumentKind::Purchase)
        .unwrap();
    assert_eq!(item.vat_mode, VatMode::LegacyPrecomputed(dec!(19)));
    assert_eq!(item.net, Some(dec!(100)));
    assert_eq!(item.vat_mode.rate_key(), RateKey::Mixed);
}

#[test]
fn legacy_record_with_flag_only() {
    let item = parse(r#"{"brutto":11.9,"mwstStatus":true}"#)
        .into_line_item(DocumentKind::Purchase)
        .unwrap();
    assert_eq!(item.vat_mode, VatMode::LegacyFlag(true));
    assert_eq!(item.net, Some(dec!(10)));
}

#[test]
fn record_without_any_vat_field() {
    let item = parse(r#"{"brutto":5}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap();
    assert_eq!(item.vat_mode, VatMode::ExplicitRate(VatRate::ZERO));
    assert_eq!(item.item_type, ItemType::Goods);
    assert_eq!(item.vat, Some(dec!(0)));
}

#[test]
fn invalid_gross_is_treated_as_absent() {
    let item = parse(r#"{"brutto":"abc","mwstProzent":19}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap();
    assert_eq!(item.gross, None);
    assert_eq!(item.net, None);
}

#[test]
fn rate_text_with_three_decimals() {
    let item = parse(r#"{"brutto":107.125,"mwstProzent":"7.125"}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap();
    assert_eq!(
        item.vat_mode,
        VatMode::ExplicitRate(VatRate::new(dec!(7.125)).unwrap())
    );
    assert_eq!(item.net, Some(dec!(100)));

    let item = parse(r#"{"brutto":"1.000","mwstProzent":"19,0"}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap();
    assert_eq!(item.gross, Some(dec!(1000)));
    assert_eq!(item.vat_mode, VatMode::ExplicitRate(VatRate::STANDARD));
}

#[test]
fn whitespace_rate_does_not_select_recorded_vat() {
    let r = parse(r#"{"brutto":119,"mwstProzent":"  ","mwst":19,"mwstStatus":false}"#);
    assert_eq!(r.rate, RawAmount::Invalid("  ".into()));
    let item = r.into_line_item(DocumentKind::Purchase).unwrap();
    assert_eq!(item.vat_mode, VatMode::LegacyFlag(false));
    assert_eq!(item.vat, Some(dec!(0)));
}

#[test]
fn oversized_records_are_rejected() {
    let err = parse(r#"{"brutto":"1000000000000000000000000000","mwstProzent":19}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap_err();
    assert!(matches!(err, BilanzError::AmountOutOfRange(_)));

    let err = parse(r#"{"brutto":10,"mwstProzent":"-99.99999999999999999999999999"}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap_err();
    assert!(matches!(err, BilanzError::InvalidRate(_)));
}

#[test]
fn rate_of_minus_hundred_is_rejected() {
    let err = parse(r#"{"brutto":10,"mwstProzent":-100}"#)
        .into_line_item(DocumentKind::Sale)
        .unwrap_err();
    assert!(matches!(err, BilanzError::InvalidRate(_)));
    assert!(err.to_string().contains("-100"));
}

// --- Whole documents ---

#[test]
fn load_mixed_legacy_document() {
    let raw: Vec<RawLineItem> = serde_json::from_str(
        r#"[
            {"typ":"Ware","brutto":119,"mwstProzent":19},
            {"typ":"Ware","brutto":10.7,"mwstProzent":null,"mwst":0.7},
            {"typ":"Rabatt","brutto":11.9,"mwstProzent":19},
            {"typ":"Versand","brutto":4.5,"mwstStatus":false}
        ]"#,
    )
    .unwrap();
    let lines = load_lines(DocumentKind::Sale, raw).unwrap();
    let totals = aggregate(&lines);

    let keys: Vec<String> = totals.groups.iter().map(|g| g.rate_key.to_string()).collect();
    assert_eq!(keys, vec!["19%", "diverse", "0%"]);

    // 19%: 119 - 11.90 = 107.10 → VAT 17.10; mixed: 0.70; 0%: 0
    assert_eq!(totals.groups[0].gross_sum, dec!(107.10));
    assert_eq!(totals.vat_total, dec!(17.80));
    assert_eq!(totals.gross_total, dec!(122.30));
    assert_eq!(totals.net_total, dec!(104.50));
}

#[test]
fn load_fails_on_first_bad_rate() {
    let raw = vec![
        RawLineItem {
            rate: RawAmount::Value(dec!(19)),
            ..Default::default()
        },
        RawLineItem {
            rate: RawAmount::Value(dec!(-120)),
            ..Default::default()
        },
    ];
    assert!(load_lines(DocumentKind::Purchase, raw).is_err());
}

// --- Typed-in values ---

#[test]
fn parse_form_values() {
    assert_eq!(parse_amount("2.499,90").unwrap(), Some(dec!(2499.90)));
    assert_eq!(parse_amount("2,499.90").unwrap(), Some(dec!(2499.90)));
    assert_eq!(parse_rate("19").unwrap(), Some(VatRate::STANDARD));
    assert!(parse_amount("19%").is_err());
}
