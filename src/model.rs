//! Data structures describing a single client call report.
//!
//! A [`ReportRecord`] is the flat set of values collected by the form.  It is created when the
//! form is submitted, handed to [`crate::layout::format_report`] and dropped once the response has
//! been produced.  The selection fields use small enums whose labels are exactly the strings shown
//! to the user and printed in the document.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Report name used when the user does not provide one.
pub const DEFAULT_REPORT_NAME: &str = "Client Call Report for Real Estate Purchase";

/// Number of days between the report date and the default delivery date.
pub const DEFAULT_DELIVERY_OFFSET_DAYS: u64 = 365;

/// Error returned when a label does not match any variant of a choice enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownChoice {
    kind: &'static str,
    value: String,
}

impl UnknownChoice {
    /// Human readable name of the selection, e.g. `unit type`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a known {}", self.value, self.kind)
    }
}

impl std::error::Error for UnknownChoice {}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label shown in the form and printed in the report.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let trimmed = input.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.label().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownChoice {
                        kind: $kind,
                        value: input.to_owned(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

choice_enum! {
    /// Kind of unit the client is looking for.
    UnitType, "unit type" {
        Studio => "Studio",
        Apartment => "Apartment",
        Duplex => "Duplex",
        Penthouse => "Penthouse",
        TownHouse => "Town House",
        TwinHouse => "Twin House",
        Villa => "Villa",
        Chalet => "Chalet",
        CommercialSpace => "Commercial Space",
        AdministrativeSpace => "Administrative Space",
    }
}

choice_enum! {
    /// Finishing level requested for the unit.
    FinishingType, "finishing type" {
        FullyFinished => "Fully Finished",
        SemiFinished => "Semi-Finished",
        CoreAndShell => "Core & Shell",
    }
}

choice_enum! {
    /// Area in which the client wants to buy.
    Location, "location" {
        SheikhZayed => "Sheikh Zayed",
        October => "October",
        OctoberGardens => "October Gardens",
        GreenBelt => "Green Belt",
        GreenRevolution => "Green Revolution",
        NewCairo => "New Cairo",
        FifthSettlement => "Fifth Settlement",
        FutureCity => "Future City",
        ElShorouk => "El Shorouk",
        AdministrativeCapital => "Administrative Capital",
        AinSokhna => "Ain Sokhna",
        RedSea => "Red Sea",
        NorthCoast => "North Coast",
    }
}

choice_enum! {
    /// How the client intends to pay.
    PaymentMethod, "payment method" {
        Cash => "Cash",
        Installment => "Installment",
    }
}

/// The flat record describing one client call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_name: String,
    pub report_date: NaiveDate,
    pub client_name: String,
    pub unit_type: UnitType,
    /// Lower bound of the requested unit area in square metres.
    pub unit_area_from: u32,
    /// Upper bound of the requested unit area in square metres.
    pub unit_area_to: u32,
    pub rooms: u32,
    pub finishing_type: FinishingType,
    pub location: Location,
    pub budget: u64,
    pub payment_method: PaymentMethod,
    pub delivery_date: NaiveDate,
    pub sales_person: String,
    pub sales_phone: String,
}

impl ReportRecord {
    /// Creates a record carrying the same defaults the empty form shows.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            report_name: DEFAULT_REPORT_NAME.to_owned(),
            report_date: today,
            client_name: String::new(),
            unit_type: UnitType::default(),
            unit_area_from: 0,
            unit_area_to: 0,
            rooms: 0,
            finishing_type: FinishingType::default(),
            location: Location::default(),
            budget: 0,
            payment_method: PaymentMethod::default(),
            delivery_date: default_delivery_date(today),
            sales_person: String::new(),
            sales_phone: String::new(),
        }
    }
}

/// Default delivery date: one year after `today`, saturating at the calendar's end.
pub fn default_delivery_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(DEFAULT_DELIVERY_OFFSET_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn choice_lists_match_form_options() {
        assert_eq!(UnitType::ALL.len(), 10);
        assert_eq!(FinishingType::ALL.len(), 3);
        assert_eq!(Location::ALL.len(), 13);
        assert_eq!(PaymentMethod::ALL.len(), 2);
        assert_eq!(UnitType::ALL[9].label(), "Administrative Space");
        assert_eq!(Location::ALL[12].label(), "North Coast");
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("core & shell".parse(), Ok(FinishingType::CoreAndShell));
        assert_eq!("  Town House ".parse(), Ok(UnitType::TownHouse));
        assert_eq!("INSTALLMENT".parse(), Ok(PaymentMethod::Installment));
    }

    #[test]
    fn unknown_label_reports_kind() {
        let err = "Castle".parse::<UnitType>().unwrap_err();
        assert_eq!(err.kind(), "unit type");
        assert_eq!(err.to_string(), "'Castle' is not a known unit type");
    }

    #[test]
    fn defaults_follow_form_defaults() {
        let record = ReportRecord::with_defaults(date(2026, 10, 19));
        assert_eq!(record.report_name, DEFAULT_REPORT_NAME);
        assert_eq!(record.unit_type, UnitType::Studio);
        assert_eq!(record.finishing_type, FinishingType::FullyFinished);
        assert_eq!(record.location, Location::SheikhZayed);
        assert_eq!(record.payment_method, PaymentMethod::Cash);
        assert_eq!(record.delivery_date, date(2027, 10, 19));
    }

    #[test]
    fn delivery_default_spans_leap_year() {
        assert_eq!(default_delivery_date(date(2027, 3, 1)), date(2028, 2, 29));
    }

    #[test]
    fn record_serializes_labels_and_iso_dates() {
        let mut record = ReportRecord::with_defaults(date(2026, 1, 5));
        record.unit_type = UnitType::CommercialSpace;
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["unit_type"], "Commercial Space");
        assert_eq!(json["report_date"], "2026-01-05");

        let back: ReportRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, record);
    }
}
