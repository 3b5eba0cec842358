//! Error types for message composition and delivery.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can go wrong while composing or delivering a message.
///
/// Composition errors (`MissingSender`, `MissingRecipients`,
/// `MultipartUnsupported`, `InvalidAddress`) are raised before any I/O
/// happens; transport errors carry the failure of a single delivery attempt.
#[derive(Error, Debug)]
pub enum Error {
    /// The message has no `from` address.
    #[error("message has no sender address")]
    MissingSender,

    /// The message has no recipients.
    #[error("message has no recipient addresses")]
    MissingRecipients,

    /// Both the plain-text and HTML bodies are non-empty.
    #[error("multipart messages are not supported: both text and html bodies are set")]
    MultipartUnsupported,

    /// An address failed the structural mailbox check.
    #[error("malformed address: {0:?}")]
    InvalidAddress(String),

    /// The MTA binary could not be spawned.
    #[error("failed to launch MTA {}: {source}", .binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the message to the transport failed (broken pipe, interrupted
    /// write, sink I/O error).
    #[error("failed to write message to transport: {0}")]
    Write(#[source] io::Error),

    /// The MTA wrote to stderr. Treated as a delivery failure regardless of
    /// the exit code.
    #[error("MTA reported an error: {}", String::from_utf8_lossy(.stderr).trim_end())]
    MtaReported { stderr: Vec<u8> },

    /// The MTA exited non-zero without writing to stderr.
    #[error("MTA exited with {0}")]
    ProcessExit(ExitStatus),
}
