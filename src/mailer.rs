//! Sender orchestration: validate, finalize, deliver.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Error;
use crate::message::Message;
use crate::transport::Transport;

/// Sends messages over one configured transport.
///
/// A send is a single linear pass: the message is validated and finalized
/// (which mutates its header set in place), serialized once, and handed to
/// the transport. The first error wins and nothing is retried; composition
/// errors short-circuit before any process is spawned.
#[derive(Debug, Default)]
pub struct Mailer {
    transport: Transport,
}

impl Mailer {
    /// Mailer delivering through the default sendmail binary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mailer delivering through a specific MTA binary.
    pub fn sendmail(binary: impl Into<PathBuf>) -> Self {
        Self {
            transport: Transport::sendmail(binary),
        }
    }

    /// Mailer writing messages to a debug sink instead of spawning an MTA.
    ///
    /// The sink sees exactly the bytes the subprocess would have read on
    /// stdin. Callers resolve their own debug toggles (environment, config)
    /// and pass the sink in here.
    pub fn sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            transport: Transport::sink(sink),
        }
    }

    /// Mailer over an explicit transport.
    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// Composes and delivers one message.
    ///
    /// The message's headers are finalized in place, so sending the same
    /// unchanged message again produces identical bytes.
    pub fn send(&mut self, message: &mut Message) -> Result<(), Error> {
        let bytes = message.to_bytes()?;
        let recipients: Vec<String> = message
            .to
            .iter()
            .map(|address| address.mailbox().to_string())
            .collect();
        log::debug!(
            "sending {} byte message to {} recipient(s)",
            bytes.len(),
            recipients.len()
        );
        self.transport.deliver(&bytes, &recipients)
    }
}
