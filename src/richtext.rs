//! Styled text fragments shared by the report formatter and the PDF renderer.
//!
//! The formatter describes *what* a line looks like (a bold label followed by a plain value, a
//! coloured heading) using [`Span`]s.  The renderer turns them into [`genpdf`] styled strings
//! without needing to know anything about report records.

use genpdf::elements::Paragraph;
use genpdf::style::{Color, Style, StyledString};

/// Gold accent used for the company name.
pub const GOLD: Color = Color::Rgb(0xb8, 0x86, 0x0b);

/// Dark slate used for the report title.
pub const SLATE: Color = Color::Rgb(0x2c, 0x3e, 0x50);

/// Grey used for field labels.
pub const LABEL_GREY: Color = Color::Rgb(0x55, 0x55, 0x55);

/// Light grey used for the footer.
pub const FOOTER_GREY: Color = Color::Rgb(0x77, 0x77, 0x77);

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    color: Option<Color>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns whether the span should be rendered in italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }

    /// Converts the span to a [`StyledString`].
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

/// Concatenates the text of all spans, i.e. what a reader sees on the line.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// Builds a paragraph that prints the spans on one logical line.
pub fn paragraph_from_spans(spans: &[Span]) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for span in spans {
        paragraph.push(span.to_styled_string());
    }
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_to_style_reflects_flags() {
        let span = Span::new("Budget:").bold().italic().colored(GOLD);
        let styled = span.to_styled_string();
        assert_eq!(styled.s, "Budget:");
        assert!(styled.style.is_bold());
        assert!(styled.style.is_italic());
        assert_eq!(styled.style.color(), Some(GOLD));
    }

    #[test]
    fn plain_text_joins_spans() {
        let spans = [Span::new("Location: ").bold(), Span::new("Red Sea")];
        assert_eq!(plain_text(&spans), "Location: Red Sea");
    }
}
