//! Form intake: turning the raw submitted strings into a [`ReportRecord`].
//!
//! The browser posts every value as text.  Validation mirrors the constraints of the input
//! widgets: numbers have a minimum of zero, dates use ISO notation and selections must be one of
//! the fixed labels.  There is no cross-field validation: an area range whose lower
//! bound exceeds the upper bound is accepted as entered.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    default_delivery_date, FinishingType, Location, PaymentMethod, ReportRecord, UnitType,
    UnknownChoice, DEFAULT_REPORT_NAME,
};

/// Date notation used in the form and in the document.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form values keyed by the HTML input names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportForm {
    pub report_name: String,
    pub client_name: String,
    pub unit_type: String,
    pub unit_area_from: String,
    pub unit_area_to: String,
    pub rooms: String,
    pub finishing_type: String,
    pub report_date: String,
    pub location: String,
    pub budget: String,
    pub payment_method: String,
    pub delivery_date: String,
    pub sales_person: String,
    pub sales_phone: String,
}

/// A validation failure attached to one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// HTML input name.
    pub field: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.message)
    }
}

/// All validation failures of one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// Returns every collected error in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the error recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &'static str, label: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            label,
            message: message.into(),
        });
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid form input: {messages}")
    }
}

impl std::error::Error for FormErrors {}

impl ReportForm {
    /// Form values shown before the user has typed anything.
    pub fn defaults(today: NaiveDate) -> Self {
        Self::from_record(&ReportRecord::with_defaults(today))
    }

    /// Renders a record back into form values.
    pub fn from_record(record: &ReportRecord) -> Self {
        Self {
            report_name: record.report_name.clone(),
            client_name: record.client_name.clone(),
            unit_type: record.unit_type.label().to_owned(),
            unit_area_from: record.unit_area_from.to_string(),
            unit_area_to: record.unit_area_to.to_string(),
            rooms: record.rooms.to_string(),
            finishing_type: record.finishing_type.label().to_owned(),
            report_date: record.report_date.format(ISO_DATE_FORMAT).to_string(),
            location: record.location.label().to_owned(),
            budget: record.budget.to_string(),
            payment_method: record.payment_method.label().to_owned(),
            delivery_date: record.delivery_date.format(ISO_DATE_FORMAT).to_string(),
            sales_person: record.sales_person.clone(),
            sales_phone: record.sales_phone.clone(),
        }
    }

    /// Validates the submitted values, collecting every field error.
    ///
    /// `today` supplies the defaults for empty date inputs.
    pub fn into_record(self, today: NaiveDate) -> Result<ReportRecord, FormErrors> {
        let mut errors = FormErrors::default();

        let report_name = match self.report_name.trim() {
            "" => DEFAULT_REPORT_NAME.to_owned(),
            name => name.to_owned(),
        };

        let unit_type = parse_choice::<UnitType>(
            &mut errors,
            "unit_type",
            "Unit Type",
            &self.unit_type,
        );
        let unit_area_from = parse_count::<u32>(
            &mut errors,
            "unit_area_from",
            "Unit Area From",
            &self.unit_area_from,
        );
        let unit_area_to =
            parse_count::<u32>(&mut errors, "unit_area_to", "To", &self.unit_area_to);
        let rooms = parse_count::<u32>(&mut errors, "rooms", "Number of Rooms", &self.rooms);
        let finishing_type = parse_choice::<FinishingType>(
            &mut errors,
            "finishing_type",
            "Finishing Type",
            &self.finishing_type,
        );
        let report_date = parse_date(
            &mut errors,
            "report_date",
            "Report Date",
            &self.report_date,
            today,
        );
        let location =
            parse_choice::<Location>(&mut errors, "location", "Location", &self.location);
        let budget = parse_count::<u64>(&mut errors, "budget", "Budget", &self.budget);
        let payment_method = parse_choice::<PaymentMethod>(
            &mut errors,
            "payment_method",
            "Payment Method",
            &self.payment_method,
        );
        let delivery_date = parse_date(
            &mut errors,
            "delivery_date",
            "Delivery Date",
            &self.delivery_date,
            default_delivery_date(today),
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every parser returns `Some` when no error was pushed.
        match (
            unit_type,
            unit_area_from,
            unit_area_to,
            rooms,
            finishing_type,
            report_date,
            location,
            budget,
            payment_method,
            delivery_date,
        ) {
            (
                Some(unit_type),
                Some(unit_area_from),
                Some(unit_area_to),
                Some(rooms),
                Some(finishing_type),
                Some(report_date),
                Some(location),
                Some(budget),
                Some(payment_method),
                Some(delivery_date),
            ) => Ok(ReportRecord {
                report_name,
                report_date,
                client_name: self.client_name.trim().to_owned(),
                unit_type,
                unit_area_from,
                unit_area_to,
                rooms,
                finishing_type,
                location,
                budget,
                payment_method,
                delivery_date,
                sales_person: self.sales_person.trim().to_owned(),
                sales_phone: self.sales_phone.trim().to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_choice<T>(
    errors: &mut FormErrors,
    field: &'static str,
    label: &'static str,
    raw: &str,
) -> Option<T>
where
    T: FromStr<Err = UnknownChoice>,
{
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(field, label, format!("must be one of the listed options ({err})"));
            None
        }
    }
}

fn parse_count<T>(
    errors: &mut FormErrors,
    field: &'static str,
    label: &'static str,
    raw: &str,
) -> Option<T>
where
    T: FromStr<Err = std::num::ParseIntError> + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(T::default());
    }
    if trimmed.starts_with('-') {
        errors.push(field, label, "must not be negative");
        return None;
    }

    match trimmed.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            let message = match err.kind() {
                IntErrorKind::PosOverflow => "is too large",
                _ => "must be a whole number",
            };
            errors.push(field, label, message);
            None
        }
    }
}

fn parse_date(
    errors: &mut FormErrors,
    field: &'static str,
    label: &'static str,
    raw: &str,
    fallback: NaiveDate,
) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(fallback);
    }

    match NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, label, "must be a date in YYYY-MM-DD format");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn filled_form() -> ReportForm {
        ReportForm {
            report_name: "Call with Mona".into(),
            client_name: " Mona Adel ".into(),
            unit_type: "Villa".into(),
            unit_area_from: "250".into(),
            unit_area_to: "400".into(),
            rooms: "5".into(),
            finishing_type: "Semi-Finished".into(),
            report_date: "2026-10-01".into(),
            location: "New Cairo".into(),
            budget: "12000000".into(),
            payment_method: "Installment".into(),
            delivery_date: "2028-06-30".into(),
            sales_person: "Omar".into(),
            sales_phone: "+20 100 000 0000".into(),
        }
    }

    #[test]
    fn valid_form_produces_record() {
        let record = filled_form().into_record(today()).expect("valid form");
        assert_eq!(record.client_name, "Mona Adel");
        assert_eq!(record.unit_type, UnitType::Villa);
        assert_eq!(record.unit_area_from, 250);
        assert_eq!(record.budget, 12_000_000);
        assert_eq!(record.payment_method, PaymentMethod::Installment);
        assert_eq!(
            record.delivery_date,
            NaiveDate::from_ymd_opt(2028, 6, 30).expect("valid date")
        );
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let mut form = filled_form();
        form.unit_area_from = "-1".into();
        form.rooms = "-3".into();
        form.budget = " -500".into();

        let errors = form.into_record(today()).unwrap_err();
        assert_eq!(errors.errors().len(), 3);
        for field in ["unit_area_from", "rooms", "budget"] {
            let error = errors.for_field(field).expect("error for field");
            assert_eq!(error.message, "must not be negative");
        }
    }

    #[test]
    fn non_numeric_and_overflowing_counts_are_rejected() {
        let mut form = filled_form();
        form.unit_area_to = "12.5".into();
        form.rooms = "99999999999".into();

        let errors = form.into_record(today()).unwrap_err();
        assert_eq!(
            errors.for_field("unit_area_to").map(|e| e.message.as_str()),
            Some("must be a whole number")
        );
        assert_eq!(
            errors.for_field("rooms").map(|e| e.message.as_str()),
            Some("is too large")
        );
    }

    #[test]
    fn empty_inputs_fall_back_to_defaults() {
        let mut form = ReportForm::defaults(today());
        form.report_name = "   ".into();
        form.report_date.clear();
        form.delivery_date.clear();
        form.budget.clear();

        let record = form.into_record(today()).expect("defaults are valid");
        assert_eq!(record, ReportRecord::with_defaults(today()));
    }

    #[test]
    fn area_range_is_not_cross_checked() {
        let mut form = filled_form();
        form.unit_area_from = "500".into();
        form.unit_area_to = "100".into();
        assert!(form.into_record(today()).is_ok());
    }

    #[test]
    fn bad_dates_and_choices_are_collected() {
        let mut form = filled_form();
        form.report_date = "19/10/2026".into();
        form.location = "Atlantis".into();

        let errors = form.into_record(today()).unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert!(errors
            .for_field("report_date")
            .expect("date error")
            .message
            .contains("YYYY-MM-DD"));
        assert!(errors.to_string().contains("'Atlantis' is not a known location"));
    }

    #[test]
    fn record_round_trips_through_form_values() {
        let record = filled_form().into_record(today()).expect("valid form");
        let again = ReportForm::from_record(&record)
            .into_record(today())
            .expect("round trip");
        assert_eq!(again, record);
    }
}
