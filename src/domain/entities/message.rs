//! Outbound message content.

use std::path::{Path, PathBuf};

/// One content part of an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    /// Image attachment referenced by file path.
    Image {
        /// Path readable by the channel.
        path: PathBuf,
    },
    /// Plain text.
    Plain {
        /// Message text.
        text: String,
    },
}

/// Ordered sequence of parts sent as one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageChain(Vec<MessagePart>);

impl MessageChain {
    /// Creates a chain from parts.
    #[must_use]
    pub const fn new(parts: Vec<MessagePart>) -> Self {
        Self(parts)
    }

    /// Creates a single-image chain.
    #[must_use]
    pub fn image(path: impl AsRef<Path>) -> Self {
        Self(vec![MessagePart::Image {
            path: path.as_ref().to_path_buf(),
        }])
    }

    /// Creates a single-text chain.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self(vec![MessagePart::Plain { text: text.into() }])
    }

    /// Returns the parts.
    #[must_use]
    pub fn parts(&self) -> &[MessagePart] {
        &self.0
    }

    /// Returns the concatenated text of all plain parts.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.0
            .iter()
            .filter_map(|part| match part {
                MessagePart::Plain { text } => Some(text.as_str()),
                MessagePart::Image { .. } => None,
            })
            .collect()
    }

    /// Returns true if the chain carries an image.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.0
            .iter()
            .any(|part| matches!(part, MessagePart::Image { .. }))
    }
}
