//! Server-rendered HTML for the form and the report preview.

use std::fmt::Write as _;

use crate::form::{FormErrors, ReportForm};
use crate::layout::{Field, ReportDocument};
use crate::model::{FinishingType, Location, PaymentMethod, UnitType};

const CSS: &str = r#"
body{font-family:Montserrat,Arial,sans-serif;color:#333;max-width:960px;margin:0 auto;padding:1.5rem}
h1{color:#b8860b;text-align:center}
h2{color:#2c3e50;text-align:center}
.panel{background:#f8f9fa;border-radius:10px;padding:1.25rem;margin-bottom:1.25rem}
.grid{display:grid;grid-template-columns:1fr 1fr;gap:1.25rem}
.field{margin-bottom:.75rem}
.field label{display:block;font-weight:600;margin-bottom:.25rem}
.field input,.field select{width:100%;padding:.4rem}
.error{color:#b00020;font-size:.85rem}
.label{font-weight:bold;color:#555}
button{background:#b8860b;color:#fff;font-weight:bold;border:none;padding:.6rem 1.2rem;border-radius:6px;cursor:pointer}
button:hover{background:#a67c00}
footer{text-align:center;color:#777;font-size:.85rem;margin-top:2rem}
"#;

/// HTML-escape a string for element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn wrap(title: &str, company: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title><style>{CSS}</style></head>
<body><h1>{company}</h1>{body}</body></html>"#,
        title = html_escape(title),
        company = html_escape(company),
    )
}

fn error_line(errors: &FormErrors, field: &str) -> String {
    errors
        .for_field(field)
        .map(|error| format!(r#"<div class="error">{}</div>"#, html_escape(&error.message)))
        .unwrap_or_default()
}

fn text_input(label: &str, name: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}">{error}</div>"#,
        label = html_escape(label),
        value = html_escape(value),
        error = error_line(errors, name),
    )
}

fn number_input(label: &str, name: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input type="number" min="0" step="1" id="{name}" name="{name}" value="{value}">{error}</div>"#,
        label = html_escape(label),
        value = html_escape(value),
        error = error_line(errors, name),
    )
}

fn date_input(label: &str, name: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input type="date" id="{name}" name="{name}" value="{value}">{error}</div>"#,
        label = html_escape(label),
        value = html_escape(value),
        error = error_line(errors, name),
    )
}

fn select_input<'a>(
    label: &str,
    name: &str,
    options: impl IntoIterator<Item = &'a str>,
    selected: &str,
    errors: &FormErrors,
) -> String {
    let mut html = format!(
        r#"<div class="field"><label for="{name}">{label}</label><select id="{name}" name="{name}">"#,
        label = html_escape(label),
    );
    for option in options {
        let marker = if option.eq_ignore_ascii_case(selected.trim()) {
            " selected"
        } else {
            ""
        };
        let option = html_escape(option);
        let _ = write!(html, r#"<option value="{option}"{marker}>{option}</option>"#);
    }
    html.push_str("</select>");
    html.push_str(&error_line(errors, name));
    html.push_str("</div>");
    html
}

/// The data-entry form, pre-filled with `form` and annotated with `errors`.
pub fn form_page(company: &str, form: &ReportForm, errors: &FormErrors) -> String {
    let left = [
        text_input("Report Name", "report_name", &form.report_name, errors),
        text_input("Client Name", "client_name", &form.client_name, errors),
        select_input(
            "Unit Type",
            "unit_type",
            UnitType::ALL.iter().map(|choice| choice.label()),
            &form.unit_type,
            errors,
        ),
        number_input(
            "Unit Area From",
            "unit_area_from",
            &form.unit_area_from,
            errors,
        ),
        number_input("To", "unit_area_to", &form.unit_area_to, errors),
        number_input("Number of Rooms", "rooms", &form.rooms, errors),
        select_input(
            "Finishing Type",
            "finishing_type",
            FinishingType::ALL.iter().map(|choice| choice.label()),
            &form.finishing_type,
            errors,
        ),
    ]
    .concat();

    let right = [
        date_input("Report Date", "report_date", &form.report_date, errors),
        select_input(
            "Location",
            "location",
            Location::ALL.iter().map(|choice| choice.label()),
            &form.location,
            errors,
        ),
        number_input("Budget", "budget", &form.budget, errors),
        select_input(
            "Payment Method",
            "payment_method",
            PaymentMethod::ALL.iter().map(|choice| choice.label()),
            &form.payment_method,
            errors,
        ),
        date_input("Delivery Date", "delivery_date", &form.delivery_date, errors),
        text_input("Sales Person", "sales_person", &form.sales_person, errors),
        text_input("Sales Phone", "sales_phone", &form.sales_phone, errors),
    ]
    .concat();

    let body = format!(
        r#"<form class="panel" method="post" action="/report">
<div class="grid"><div>{left}</div><div>{right}</div></div>
<button type="submit">Generate Report</button></form>"#
    );
    wrap("Client Call Report for Real Estate Purchase", company, &body)
}

fn field_html(field: &Field) -> String {
    format!(
        r#"<p><span class="label">{}:</span> <span class="value">{}</span></p>"#,
        html_escape(field.label()),
        html_escape(field.value()),
    )
}

fn hidden_inputs(form: &ReportForm) -> String {
    [
        ("report_name", &form.report_name),
        ("client_name", &form.client_name),
        ("unit_type", &form.unit_type),
        ("unit_area_from", &form.unit_area_from),
        ("unit_area_to", &form.unit_area_to),
        ("rooms", &form.rooms),
        ("finishing_type", &form.finishing_type),
        ("report_date", &form.report_date),
        ("location", &form.location),
        ("budget", &form.budget),
        ("payment_method", &form.payment_method),
        ("delivery_date", &form.delivery_date),
        ("sales_person", &form.sales_person),
        ("sales_phone", &form.sales_phone),
    ]
    .iter()
    .map(|(name, value)| {
        format!(
            r#"<input type="hidden" name="{name}" value="{}">"#,
            html_escape(value)
        )
    })
    .collect()
}

/// The submitted report with a button that downloads it as PDF.
pub fn preview_page(document: &ReportDocument, form: &ReportForm) -> String {
    let left: String = document.left_column().iter().map(field_html).collect();
    let right: String = document.right_column().iter().map(field_html).collect();

    let body = format!(
        r#"<div class="panel"><h2>{title}</h2>
<div class="grid"><div>{left}</div><div>{right}</div></div>
<form method="post" action="/report.pdf">{hidden}<button type="submit">Download Report as PDF</button></form>
<p><a href="/">New report</a></p></div>
<footer>{footer}</footer>"#,
        title = html_escape(document.title()),
        hidden = hidden_inputs(form),
        footer = html_escape(document.footer()),
    );
    wrap(document.title(), document.header().company_name(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#x27;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn form_lists_every_choice_and_marks_selection() {
        let mut form = ReportForm::defaults(today());
        form.location = "Red Sea".into();
        let html = form_page("ACME", &form, &FormErrors::default());

        for location in Location::ALL {
            assert!(html.contains(&format!(r#"value="{}""#, html_escape(location.label()))));
        }
        assert!(html.contains(r#"<option value="Red Sea" selected>"#));
        assert!(html.contains(r#"value="2026-10-19""#));
        assert!(html.contains(r#"value="2027-10-19""#));
        assert!(html.contains(r#"min="0""#));
    }

    #[test]
    fn form_shows_field_errors() {
        let mut form = ReportForm::defaults(today());
        form.budget = "-1".into();
        let errors = form.clone().into_record(today()).unwrap_err();
        let html = form_page("ACME", &form, &errors);
        assert!(html.contains("must not be negative"));
        assert!(html.contains(r#"value="-1""#));
    }
}
