//! Image format sniffing and persisted image handles.

use std::path::{Path, PathBuf};

/// Image container format, inferred from magic bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// JPEG, also the fallback for anything unrecognized.
    #[default]
    Jpeg,
    /// PNG.
    Png,
    /// GIF.
    Gif,
}

impl ImageFormat {
    const PNG_MAGIC: &'static [u8] = b"\x89PNG";
    const GIF_MAGIC: &'static [u8] = b"GIF";

    /// Infers the format from the leading bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(Self::PNG_MAGIC) {
            Self::Png
        } else if bytes.starts_with(Self::GIF_MAGIC) {
            Self::Gif
        } else {
            Self::Jpeg
        }
    }

    /// Returns the file extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A transient image file written for one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedImage {
    path: PathBuf,
    format: ImageFormat,
}

impl PersistedImage {
    /// Wraps a written file.
    #[must_use]
    pub const fn new(path: PathBuf, format: ImageFormat) -> Self {
        Self { path, format }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the sniffed format.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }
}
