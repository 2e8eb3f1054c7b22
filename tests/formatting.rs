use call_report::config::Branding;
use call_report::model::{FinishingType, Location, PaymentMethod, ReportRecord, UnitType};
use call_report::{format_report, ReportForm};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

/// One record per location, cycling through the other selections.
fn records() -> Vec<ReportRecord> {
    Location::ALL
        .iter()
        .enumerate()
        .map(|(index, location)| {
            let mut record = ReportRecord::with_defaults(today());
            record.client_name = format!("Client #{index} <VIP>");
            record.location = *location;
            record.unit_type = UnitType::ALL[index % UnitType::ALL.len()];
            record.finishing_type = FinishingType::ALL[index % FinishingType::ALL.len()];
            record.payment_method = PaymentMethod::ALL[index % PaymentMethod::ALL.len()];
            record.unit_area_from = 50 * index as u32;
            record.unit_area_to = 75 * index as u32 + 10;
            record.rooms = index as u32;
            record.budget = 1_000_000 + 250_000 * index as u64;
            record.sales_person = "Sara Hegazy".into();
            record.sales_phone = format!("0100{index:07}");
            record
        })
        .collect()
}

#[test]
fn document_contains_every_value() {
    for record in records() {
        let text = format_report(&record, &Branding::default(), today())
            .visible_text()
            .join("\n");

        let expected = [
            record.report_name.clone(),
            record.client_name.clone(),
            record.unit_type.to_string(),
            record.unit_area_from.to_string(),
            record.unit_area_to.to_string(),
            record.rooms.to_string(),
            record.finishing_type.to_string(),
            record.location.to_string(),
            record.budget.to_string(),
            record.payment_method.to_string(),
            record.report_date.format("%Y-%m-%d").to_string(),
            record.delivery_date.format("%Y-%m-%d").to_string(),
            record.sales_person.clone(),
            record.sales_phone.clone(),
        ];
        for value in expected {
            assert!(text.contains(&value), "{value:?} missing from:\n{text}");
        }
    }
}

#[test]
fn submitted_form_reaches_document_unchanged() {
    for record in records() {
        let submitted = ReportForm::from_record(&record)
            .into_record(today())
            .expect("form built from a record is valid");
        let direct = format_report(&record, &Branding::default(), today());
        let via_form = format_report(&submitted, &Branding::default(), today());
        assert_eq!(direct.visible_text(), via_form.visible_text());
    }
}
