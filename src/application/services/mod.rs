//! Stateless application services.

pub mod image_normalizer;
pub mod source_router;
pub mod url_extractor;

pub use image_normalizer::{CompressionConfig, ImageNormalizer};
pub use source_router::SourceRouter;
pub use url_extractor::UrlExtractor;
