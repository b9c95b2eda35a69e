//! Channel that prints messages to a writer, stdout by default.

use std::io::Write;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::entities::{MessageChain, MessagePart};
use crate::domain::errors::DeliveryError;
use crate::domain::ports::OutboundPort;

/// Prints plain parts verbatim and image parts as their file path.
pub struct ConsoleChannel {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleChannel {
    /// Creates a channel writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    /// Creates a channel writing to the given sink.
    #[must_use]
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::stdout()
    }
}

#[async_trait]
impl OutboundPort for ConsoleChannel {
    async fn send(&self, chain: &MessageChain) -> Result<(), DeliveryError> {
        let mut out = self.out.lock();
        for part in chain.parts() {
            match part {
                MessagePart::Image { path } => writeln!(out, "[image] {}", path.display())?,
                MessagePart::Plain { text } => writeln!(out, "{text}")?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_prints_each_part_on_its_own_line() {
        let buffer = SharedBuffer::default();
        let channel = ConsoleChannel::with_writer(Box::new(buffer.clone()));

        channel
            .send(&MessageChain::new(vec![
                MessagePart::Plain {
                    text: "here you go".to_string(),
                },
                MessagePart::Image {
                    path: "/tmp/a.png".into(),
                },
            ]))
            .await
            .unwrap();

        let printed = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(printed, "here you go\n[image] /tmp/a.png\n");
    }
}
