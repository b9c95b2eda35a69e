//! Domain entity definitions.

mod fetch_attempt;
mod image;
mod message;
mod outcome;
mod source;

pub use fetch_attempt::FetchAttempt;
pub use image::{ImageFormat, PersistedImage};
pub use message::{MessageChain, MessagePart};
pub use outcome::DeliveryOutcome;
pub use source::Source;
