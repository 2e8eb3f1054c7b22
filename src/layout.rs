//! The document formatter: a pure mapping from a [`ReportRecord`] to a fixed report layout.
//!
//! [`ReportDocument`] is independent of any PDF machinery.  The web preview, the CLI `preview`
//! command and the PDF renderer all consume the same value, so what the user sees on screen is
//! exactly what ends up in the file.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

use crate::config::Branding;
use crate::form::ISO_DATE_FORMAT;
use crate::model::ReportRecord;
use crate::richtext::{self, Span, GOLD, LABEL_GREY, SLATE};

/// One labelled value of the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    label: &'static str,
    value: String,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Bold grey label followed by the plain value.
    pub fn spans(&self) -> Vec<Span> {
        vec![
            Span::new(format!("{}: ", self.label))
                .bold()
                .colored(LABEL_GREY),
            Span::new(self.value.clone()),
        ]
    }

    /// The line as read in the document, e.g. `Budget: 1500000`.
    pub fn line(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Company header shown above the title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    company_name: String,
    logo_path: Option<PathBuf>,
}

impl Header {
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn logo_path(&self) -> Option<&PathBuf> {
        self.logo_path.as_ref()
    }

    pub fn spans(&self) -> Vec<Span> {
        vec![Span::new(self.company_name.clone()).bold().colored(GOLD)]
    }
}

/// The formatted report, ready to be previewed or rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportDocument {
    header: Header,
    title: String,
    left: Vec<Field>,
    right: Vec<Field>,
    footer: String,
}

impl ReportDocument {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_spans(&self) -> Vec<Span> {
        vec![Span::new(self.title.clone()).bold().colored(SLATE)]
    }

    /// Client and unit details.
    pub fn left_column(&self) -> &[Field] {
        &self.left
    }

    /// Dates, money and sales contact.
    pub fn right_column(&self) -> &[Field] {
        &self.right
    }

    /// Copyright line printed at the bottom of every page.
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// Every field, left column first.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.left.iter().chain(self.right.iter())
    }

    /// Visible text lines in reading order.
    pub fn visible_text(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.left.len() + self.right.len() + 3);
        lines.push(richtext::plain_text(&self.header.spans()));
        lines.push(self.title.clone());
        lines.extend(self.fields().map(Field::line));
        lines.push(self.footer.clone());
        lines
    }
}

/// Formats `record` into the fixed two-column report layout.
///
/// `generated_on` only determines the copyright year, so formatting the same record on the same
/// day always yields the same document.
pub fn format_report(
    record: &ReportRecord,
    branding: &Branding,
    generated_on: NaiveDate,
) -> ReportDocument {
    let left = vec![
        Field::new("Client Name", record.client_name.as_str()),
        Field::new("Unit Type", record.unit_type.label()),
        Field::new(
            "Unit Area",
            format!(
                "From {} to {} sq.m",
                record.unit_area_from, record.unit_area_to
            ),
        ),
        Field::new("Number of Rooms", record.rooms.to_string()),
        Field::new("Finishing Type", record.finishing_type.label()),
        Field::new("Location", record.location.label()),
    ];

    let right = vec![
        Field::new("Report Date", iso_date(record.report_date)),
        Field::new("Budget", record.budget.to_string()),
        Field::new("Payment Method", record.payment_method.label()),
        Field::new("Delivery Date", iso_date(record.delivery_date)),
        Field::new("Sales Person", record.sales_person.as_str()),
        Field::new("Sales Phone", record.sales_phone.as_str()),
    ];

    ReportDocument {
        header: Header {
            company_name: branding.company_name.clone(),
            logo_path: branding.logo_path.clone(),
        },
        title: record.report_name.clone(),
        left,
        right,
        footer: format!(
            "\u{a9} {} {} - All Rights Reserved",
            generated_on.year(),
            branding.company_name
        ),
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinishingType, Location, PaymentMethod, UnitType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample_record() -> ReportRecord {
        ReportRecord {
            report_name: "Follow-up call".into(),
            report_date: date(2026, 3, 7),
            client_name: "Hany Fawzy".into(),
            unit_type: UnitType::TwinHouse,
            unit_area_from: 180,
            unit_area_to: 260,
            rooms: 4,
            finishing_type: FinishingType::CoreAndShell,
            location: Location::FifthSettlement,
            budget: 9_750_000,
            payment_method: PaymentMethod::Cash,
            delivery_date: date(2027, 12, 31),
            sales_person: "Nour".into(),
            sales_phone: "01001234567".into(),
        }
    }

    fn text_of(document: &ReportDocument) -> String {
        document.visible_text().join("\n")
    }

    #[test]
    fn every_value_appears_verbatim() {
        let record = sample_record();
        let document = format_report(&record, &Branding::default(), date(2026, 10, 19));
        let text = text_of(&document);

        for value in [
            record.report_name.as_str(),
            record.client_name.as_str(),
            record.unit_type.label(),
            "180",
            "260",
            "4",
            record.finishing_type.label(),
            record.location.label(),
            "9750000",
            record.payment_method.label(),
            record.sales_person.as_str(),
            record.sales_phone.as_str(),
        ] {
            assert!(text.contains(value), "missing {value:?} in:\n{text}");
        }
    }

    #[test]
    fn dates_are_printed_in_iso_format() {
        let document = format_report(&sample_record(), &Branding::default(), date(2026, 10, 19));
        let lines = document.visible_text();
        assert!(lines.contains(&"Report Date: 2026-03-07".to_string()));
        assert!(lines.contains(&"Delivery Date: 2027-12-31".to_string()));
    }

    #[test]
    fn columns_follow_fixed_order() {
        let document = format_report(&sample_record(), &Branding::default(), date(2026, 10, 19));
        let left: Vec<_> = document.left_column().iter().map(Field::label).collect();
        let right: Vec<_> = document.right_column().iter().map(Field::label).collect();
        assert_eq!(
            left,
            [
                "Client Name",
                "Unit Type",
                "Unit Area",
                "Number of Rooms",
                "Finishing Type",
                "Location"
            ]
        );
        assert_eq!(
            right,
            [
                "Report Date",
                "Budget",
                "Payment Method",
                "Delivery Date",
                "Sales Person",
                "Sales Phone"
            ]
        );
        assert_eq!(document.left_column()[2].value(), "From 180 to 260 sq.m");
    }

    #[test]
    fn header_and_footer_use_branding() {
        let branding = Branding {
            company_name: "Delta Homes".into(),
            logo_path: None,
        };
        let document = format_report(&sample_record(), &branding, date(2031, 1, 2));
        let lines = document.visible_text();
        assert_eq!(lines.first().map(String::as_str), Some("Delta Homes"));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("\u{a9} 2031 Delta Homes - All Rights Reserved")
        );
        assert!(document.header().logo_path().is_none());
    }

    #[test]
    fn formatting_is_deterministic() {
        let record = sample_record();
        let branding = Branding::default();
        let first = format_report(&record, &branding, date(2026, 10, 19));
        let second = format_report(&record, &branding, date(2026, 10, 19));
        assert_eq!(first.visible_text(), second.visible_text());
        assert_eq!(first, second);
    }

    #[test]
    fn field_spans_read_like_the_line() {
        let document = format_report(&sample_record(), &Branding::default(), date(2026, 10, 19));
        for field in document.fields() {
            assert_eq!(richtext::plain_text(&field.spans()), field.line());
        }
    }
}
