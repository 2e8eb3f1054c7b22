//! Custom `genpdf` elements used by the report renderer.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::Image;
use genpdf::error::{Context as _, Error};
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Mm, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode image from provided bytes")
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// The company logo: an image scaled to a fixed width while keeping its aspect ratio.
pub struct LogoImage {
    image: Image,
    natural_size: Size,
    alignment: Alignment,
    requested_width: Option<Mm>,
}

impl LogoImage {
    /// Creates a logo from an already decoded image.
    pub fn from_dynamic_image(image: image::DynamicImage) -> Result<Self, Error> {
        let natural_size = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
        let image = Image::from_dynamic_image(image)?;
        Ok(Self {
            image,
            natural_size,
            alignment: Alignment::Center,
            requested_width: None,
        })
    }

    /// Creates a logo from the contents of `bytes`.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        Self::from_dynamic_image(decode_image_from_bytes(bytes)?)
    }

    /// Creates a logo from the file located at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_dynamic_image(decode_image_from_path(path)?)
    }

    /// Sets the horizontal alignment and returns the updated element.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Constrains the rendered width and returns the updated element.
    pub fn with_width(mut self, width: impl Into<Option<Mm>>) -> Self {
        self.requested_width = width.into();
        self
    }

    /// Scale factor applied to reach the requested width.
    pub fn scale_factor(&self) -> f64 {
        let natural = mm_to_f64(self.natural_size.width);
        match self.requested_width {
            Some(width) if natural > f64::EPSILON => mm_to_f64(width) / natural,
            _ => 1.0,
        }
    }
}

impl Element for LogoImage {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let scale = self.scale_factor();
        self.image.set_alignment(self.alignment);
        self.image.set_scale(Scale::new(scale, scale));
        self.image.render(context, area, style)
    }
}
