//! Client call reports for real-estate sales teams.
//!
//! A sales person fills in a single form ([`form`]), the values become a [`model::ReportRecord`],
//! the [`layout`] module formats the record into a fixed two-column document and [`render`] turns
//! that document into a PDF offered for download by the [`web`] form or written by the CLI.

pub mod builder;
pub mod config;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod form;
pub mod input;
pub mod layout;
pub mod model;
pub mod render;
pub mod richtext;
pub mod web;

pub use config::{AppConfig, Branding};
pub use error::ReportError;
pub use form::{FormErrors, ReportForm};
pub use layout::{format_report, ReportDocument};
pub use model::ReportRecord;
pub use render::{RenderOptions, RenderedPdf, ReportRenderer};
