//! Font discovery for the PDF renderer.
//!
//! `genpdf` embeds TrueType fonts, so a complete family (regular, bold, italic, bold italic) must
//! be present on disk.  Directories are searched in this order:
//!
//! 1. the directory passed by the caller (config file or `--fonts-dir`),
//! 2. `CALL_REPORT_FONTS_DIR`,
//! 3. `assets/fonts` next to the executable, then under the crate manifest directory,
//! 4. Liberation Sans in the usual Linux system font directories,
//! 5. Windows Arial from `CALL_REPORT_WINDOWS_FONTS_DIR` or `%WINDIR%\Fonts`.
//!
//! Steps 1-3 expect the bundled `Roboto-*.ttf` files.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

use crate::error::ReportError;

/// Environment variable naming a directory with the bundled font family.
pub const FONTS_DIR_ENV_VAR: &str = "CALL_REPORT_FONTS_DIR";

/// Environment variable naming a Windows-style font directory used as the last fallback.
pub const WINDOWS_FONTS_DIR_ENV_VAR: &str = "CALL_REPORT_WINDOWS_FONTS_DIR";

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

const SYSTEM_FONT_FAMILY_NAME: &str = "LiberationSans";

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
];

const FAMILY_SUFFIXES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

const WINDOWS_FALLBACK_FAMILY_NAME: &str = "Arial";

struct WindowsFontFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const WINDOWS_FONT_FILES: WindowsFontFiles = WindowsFontFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Candidate {
    directory: PathBuf,
    family: &'static str,
}

impl Candidate {
    fn new(directory: impl Into<PathBuf>, family: &'static str) -> Self {
        Self {
            directory: directory.into(),
            family,
        }
    }

    fn missing_files(&self) -> Vec<String> {
        FAMILY_SUFFIXES
            .iter()
            .map(|suffix| format!("{}-{}.ttf", self.family, suffix))
            .filter(|name| !self.directory.join(name).is_file())
            .collect()
    }
}

/// Returns the bundled font directory inside the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn candidates(preferred: Option<&Path>) -> Vec<Candidate> {
    let mut list = Vec::new();
    let mut push = |candidate: Candidate| {
        if !list.contains(&candidate) {
            list.push(candidate);
        }
    };

    if let Some(directory) = preferred {
        push(Candidate::new(directory, DEFAULT_FONT_FAMILY_NAME));
    }

    if let Some(directory) = env_path(FONTS_DIR_ENV_VAR) {
        push(Candidate::new(directory, DEFAULT_FONT_FAMILY_NAME));
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(Candidate::new(
                bin_dir.join("assets/fonts"),
                DEFAULT_FONT_FAMILY_NAME,
            ));
        }
    }

    push(Candidate::new(
        bundled_fonts_source_dir(),
        DEFAULT_FONT_FAMILY_NAME,
    ));

    for directory in SYSTEM_FONT_DIRECTORIES {
        push(Candidate::new(*directory, SYSTEM_FONT_FAMILY_NAME));
    }

    list
}

fn resolve_candidate(preferred: Option<&Path>) -> Result<Candidate, Error> {
    let mut attempts = Vec::new();

    for candidate in candidates(preferred) {
        if !candidate.directory.is_dir() {
            attempts.push(format!(
                "{} (directory missing)",
                candidate.directory.display()
            ));
            continue;
        }

        let missing = candidate.missing_files();
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.directory.display(),
            missing.join(", ")
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate a font family. Checked: {}. See assets/fonts/README.md or set {}.",
            attempts.join(", "),
            FONTS_DIR_ENV_VAR
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_candidate(candidate: &Candidate) -> Result<FontFamily<FontData>, Error> {
    debug!(
        "Loading font family '{}' from {}",
        candidate.family,
        candidate.directory.display()
    );
    fonts::from_files(&candidate.directory, candidate.family, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                candidate.family,
                candidate.directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV_VAR) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn load_windows_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load Windows fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn windows_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;

    Ok(FontFamily {
        regular: load_windows_font(&directory, WINDOWS_FONT_FILES.regular, "regular")?,
        bold: load_windows_font(&directory, WINDOWS_FONT_FILES.bold, "bold")?,
        italic: load_windows_font(&directory, WINDOWS_FONT_FILES.italic, "italic")?,
        bold_italic: load_windows_font(&directory, WINDOWS_FONT_FILES.bold_italic, "bold italic")?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

fn try_load_font_family(preferred: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let search_error = match resolve_candidate(preferred) {
        Ok(candidate) => return load_candidate(&candidate),
        Err(err) => err,
    };

    if !fonts_missing(&search_error) {
        return Err(search_error);
    }

    match windows_fallback_font_family() {
        Ok(fallback) => {
            warn!(
                "No font family found ({}); falling back to Windows '{}' family.",
                search_error, WINDOWS_FALLBACK_FAMILY_NAME
            );
            Ok(fallback)
        }
        Err(fallback_err) => {
            warn!(
                "No font family found ({}); Windows fallback failed: {}",
                search_error, fallback_err
            );
            Err(Error::new(
                format!("{} Windows fallback failed: {}", search_error, fallback_err),
                io::Error::new(io::ErrorKind::NotFound, "no usable fonts available"),
            ))
        }
    }
}

/// Loads the first complete font family found in the search order described in the module docs.
pub fn load_font_family(preferred: Option<&Path>) -> Result<FontFamily<FontData>, ReportError> {
    try_load_font_family(preferred).map_err(ReportError::FontLoad)
}

/// Indicates whether a complete font family can be found for rendering.
pub fn default_fonts_available(preferred: Option<&Path>) -> bool {
    resolve_candidate(preferred).is_ok() || windows_fallback_font_family().is_ok()
}
