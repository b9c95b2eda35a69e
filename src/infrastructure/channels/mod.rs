//! Outbound channel adapters.

pub mod console;
pub mod webhook;

pub use console::ConsoleChannel;
pub use webhook::WebhookChannel;
