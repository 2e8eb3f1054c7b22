//! Reading report records from files for the command line.
//!
//! The format is chosen by extension: `.json` is parsed as JSON, anything else as TOML.  Every
//! field of [`ReportRecord`] must be present; selections use their labels and dates ISO notation.

use std::fs;
use std::path::Path;

use crate::error::ReportError;
use crate::model::ReportRecord;

/// Parses a record from `path`.
pub fn load_record(path: impl AsRef<Path>) -> Result<ReportRecord, ReportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ReportError::Io {
        context: format!("reading record file {}", path.display()),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed: Result<ReportRecord, String> = if is_json {
        serde_json::from_str(&text).map_err(|err| err.to_string())
    } else {
        toml::from_str(&text).map_err(|err| err.to_string())
    };

    parsed.map_err(|message| ReportError::Input {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, UnitType};

    const RECORD_TOML: &str = r#"
report_name = "Client Call Report for Real Estate Purchase"
report_date = "2026-10-19"
client_name = "Youssef"
unit_type = "Penthouse"
unit_area_from = 200
unit_area_to = 320
rooms = 3
finishing_type = "Fully Finished"
location = "Sheikh Zayed"
budget = 15000000
payment_method = "Installment"
delivery_date = "2027-10-19"
sales_person = "Dina"
sales_phone = "01111111111"
"#;

    #[test]
    fn reads_toml_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("call.toml");
        fs::write(&path, RECORD_TOML).expect("write record");

        let record = load_record(&path).expect("load record");
        assert_eq!(record.unit_type, UnitType::Penthouse);
        assert_eq!(record.location, Location::SheikhZayed);
        assert_eq!(record.budget, 15_000_000);
    }

    #[test]
    fn reads_json_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let toml_record: ReportRecord = toml::from_str(RECORD_TOML).expect("parse toml");
        let path = dir.path().join("call.JSON");
        fs::write(&path, serde_json::to_string(&toml_record).expect("to json"))
            .expect("write record");

        assert_eq!(load_record(&path).expect("load record"), toml_record);
    }

    #[test]
    fn negative_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("call.toml");
        fs::write(&path, RECORD_TOML.replace("rooms = 3", "rooms = -3")).expect("write record");

        let err = load_record(&path).unwrap_err();
        assert!(matches!(err, ReportError::Input { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_record("/no/such/record.toml").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
