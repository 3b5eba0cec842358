//! pipemail — the classic method of sending emails, well known from PHP:
//! compose an RFC 5322 message and pipe it to a local sendmail-compatible
//! MTA binary.
//!
//! Messages carry a subject, a sender, recipients, arbitrary headers and at
//! most one of a plain-text or HTML body (multipart is deliberately
//! unsupported). Delivery goes through a [`Transport`]: either an MTA
//! subprocess fed on stdin, or any byte sink for inspection — the sink
//! receives exactly the bytes the subprocess would have.
//!
//! # Example
//!
//! ```no_run
//! use pipemail::{Address, Mailer, Message};
//!
//! # fn main() -> Result<(), pipemail::Error> {
//! let mut message = Message::new()
//!     .with_from(Address::with_name("Michał", "me@example.com")?)
//!     .with_to(Address::parse("Ktoś <info@example.com>")?)
//!     .with_subject("Cześć")
//!     .with_text(":)\r\n".as_bytes());
//!
//! Mailer::new().send(&mut message)?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod errors;
pub mod headers;
pub mod mailer;
pub mod message;
pub mod transport;
pub mod utils;
pub mod validate;

// Re-exports
pub use address::Address;
pub use errors::Error;
pub use headers::HeaderSet;
pub use mailer::Mailer;
pub use message::Message;
pub use transport::{SendmailCommand, Transport, DEFAULT_SENDMAIL};
pub use utils::encode_header;
pub use validate::{is_valid_mailbox, validate, ValidateError};
