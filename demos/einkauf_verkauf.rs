use chrono::NaiveDate;
use perlenbilanz::core::*;
use perlenbilanz::input::*;
use perlenbilanz::overview::*;
use rust_decimal_macros::dec;

const STORED_PURCHASE: &str = r#"[
    {"datum": "2012-11-03", "typ": "Ware", "bezeichnung": "Glasperlen 8mm",
     "stueck": 200, "brutto": "23,80", "mwstProzent": "", "mwst": "3,80"},
    {"datum": "2012-11-03", "typ": "Versand", "brutto": 4.9, "mwstStatus": true}
]"#;

fn print_totals(title: &str, totals: &DocumentTotals) {
    println!("{title}");
    for group in &totals.groups {
        println!(
            "  {:>8}  brutto {:>8}  mwst {:>7}  netto {:>8}",
            group.rate_key.to_string(),
            group.gross_sum,
            group.vat_sum,
            group.net_sum
        );
    }
    println!(
        "  {:>8}  brutto {:>8}  mwst {:>7}  netto {:>8}",
        "summe", totals.gross_total, totals.vat_total, totals.net_total
    );
}

fn main() {
    // A purchase recorded before rates were stored per position
    let raw: Vec<RawLineItem> = serde_json::from_str(STORED_PURCHASE).unwrap();
    let mut purchase = DocumentBuilder::new(DocumentKind::Purchase)
        .platform("perlenmarkt")
        .order_number("PM-88120")
        .value_date(NaiveDate::from_ymd_opt(2012, 11, 5).unwrap())
        .build()
        .unwrap();
    for line in load_lines(DocumentKind::Purchase, raw).unwrap() {
        purchase.push_line(line);
    }
    print_totals("Einkauf", purchase.totals().unwrap());

    // A sale entered today
    let mut sale = DocumentBuilder::new(DocumentKind::Sale)
        .invoice(2013, 17)
        .platform("fancywork")
        .name("Erika Mustermann")
        .payment_method("Konto")
        .add_line(
            LineItemBuilder::new(ItemType::Goods)
                .description("Perlenkette")
                .gross(parse_amount("59,50").unwrap().unwrap())
                .rate(VatRate::STANDARD)
                .delivered(true)
                .build(),
        )
        .add_line(
            LineItemBuilder::new(ItemType::Goods)
                .description("Anleitung (Buch)")
                .gross(dec!(12.84))
                .rate(VatRate::REDUCED)
                .build(),
        )
        .add_line(
            LineItemBuilder::new(ItemType::Discount)
                .description("Stammkundenrabatt")
                .gross(dec!(5.95))
                .rate(VatRate::STANDARD)
                .build(),
        )
        .build()
        .unwrap();
    print_totals("Verkauf", sale.totals().unwrap());

    let problems = validate_totals(sale.totals().unwrap());
    println!("Prüfung: {} Fehler", problems.len());

    let docs = vec![purchase, sale.clone()];
    for open in open_positions(&docs, DocumentKind::Sale) {
        println!("Offen: Beleg {} {}", open.document, open.line.description);
    }
    println!("Ohne Valuta: {}", missing_value_date(&docs).len());

    // Book the payment and look at the balance
    sale.value_date = NaiveDate::from_ymd_opt(2013, 6, 2);
    let docs = vec![docs[0].clone(), sale];
    let overview = Overview::from_documents(&docs);
    println!(
        "Saldo brutto {}  MwSt-Zahllast {}",
        overview.gross_balance(),
        overview.vat_balance()
    );
}
