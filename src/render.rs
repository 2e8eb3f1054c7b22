//! PDF rendering of a formatted [`ReportDocument`].

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use genpdf::elements::{Break, LinearLayout, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Element as _, PaperSize};
use log::{debug, warn};

use crate::builder::DocumentBuilder;
use crate::config::AppConfig;
use crate::elements::{mm_from_f64, LogoImage};
use crate::error::ReportError;
use crate::layout::{Field, ReportDocument};
use crate::richtext::{paragraph_from_spans, FOOTER_GREY};

/// Page margin on every side.
pub const PAGE_MARGIN_MM: f64 = 20.0;

const FOOTER_HEIGHT_MM: f64 = 10.0;
const COMPANY_FONT_SIZE: u8 = 18;
const TITLE_FONT_SIZE: u8 = 14;
const FOOTER_FONT_SIZE: u8 = 9;
const COLUMN_GAP_MM: f64 = 5.0;

/// Settings that influence how reports are rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub fonts_dir: Option<PathBuf>,
    pub logo_width_mm: f64,
    pub file_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            fonts_dir: config.fonts.directory.clone(),
            logo_width_mm: config.layout.logo_width_mm,
            file_prefix: config.output.file_prefix.clone(),
        }
    }
}

/// Result of a successful render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPdf {
    /// Suggested download name, e.g. `real_estate_report_20261019_142501.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Builds the download name for a report generated at `generated_at`.
pub fn report_file_name(prefix: &str, generated_at: NaiveDateTime) -> String {
    format!("{}_{}.pdf", prefix, generated_at.format("%Y%m%d_%H%M%S"))
}

/// Renders [`ReportDocument`]s to PDF bytes.
#[derive(Clone, Debug, Default)]
pub struct ReportRenderer {
    options: RenderOptions,
}

impl ReportRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `report`; `generated_at` only affects the file name.
    pub fn render(
        &self,
        report: &ReportDocument,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedPdf, ReportError> {
        let footer_text = report.footer().to_owned();
        let mut document = DocumentBuilder::new()
            .with_title(report.title())
            .with_fonts_dir(self.options.fonts_dir.clone())
            .with_paper_size(PaperSize::Letter)
            .with_margins(PAGE_MARGIN_MM)
            .with_footer(FOOTER_HEIGHT_MM, move |_| {
                let mut line = Paragraph::new(footer_text.clone());
                line.set_alignment(Alignment::Center);
                line.styled(
                    Style::new()
                        .with_font_size(FOOTER_FONT_SIZE)
                        .with_color(FOOTER_GREY),
                )
            })
            .build()?;

        if let Some(logo) = report
            .header()
            .logo_path()
            .and_then(|path| self.load_logo(path))
        {
            document.push(logo);
            document.push(Break::new(0.5));
        }

        let mut company = paragraph_from_spans(&report.header().spans());
        company.set_alignment(Alignment::Center);
        document.push(company.styled(Style::new().with_font_size(COMPANY_FONT_SIZE)));
        document.push(Break::new(1));

        document.push(
            paragraph_from_spans(&report.title_spans())
                .styled(Style::new().with_font_size(TITLE_FONT_SIZE)),
        );
        document.push(Break::new(0.5));

        let mut columns = TableLayout::new(vec![1, 1]);
        columns
            .row()
            .element(field_column(report.left_column()).padded((0.0, COLUMN_GAP_MM, 0.0, 0.0)))
            .element(field_column(report.right_column()))
            .push()
            .map_err(ReportError::Render)?;
        document.push(columns);

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(ReportError::Render)?;
        debug!("Rendered report '{}' ({} bytes)", report.title(), bytes.len());

        Ok(RenderedPdf {
            file_name: report_file_name(&self.options.file_prefix, generated_at),
            bytes,
        })
    }

    fn load_logo(&self, path: &Path) -> Option<LogoImage> {
        if !path.is_file() {
            warn!("Logo {} not found; rendering without it", path.display());
            return None;
        }

        match LogoImage::from_path(path) {
            Ok(logo) => Some(
                logo.with_alignment(Alignment::Center)
                    .with_width(mm_from_f64(self.options.logo_width_mm)),
            ),
            Err(err) => {
                warn!(
                    "Logo {} could not be decoded ({}); rendering without it",
                    path.display(),
                    err
                );
                None
            }
        }
    }
}

fn field_column(fields: &[Field]) -> LinearLayout {
    let mut column = LinearLayout::vertical();
    for field in fields {
        column.push(paragraph_from_spans(&field.spans()));
    }
    column
}
