//! Message composition and serialization.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::errors::Error;
use crate::headers::HeaderSet;
use crate::utils::encode_header;

/// One email: subject, sender, recipients, headers, and at most one of a
/// plain-text or HTML body.
///
/// Fields are public and can be assigned directly; the `with_*` methods
/// exist for chained construction. Serialization finalizes the header set
/// in place, so writing the same unchanged message twice produces identical
/// bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub subject: String,
    pub from: Option<Address>,
    pub to: Vec<Address>,
    pub headers: HeaderSet,
    pub text: Vec<u8>,
    pub html: Vec<u8>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Appends a recipient. Duplicates are kept; the `To` header and the
    /// MTA argument list both follow insertion order.
    pub fn with_to(mut self, to: Address) -> Self {
        self.to.push(to);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<Vec<u8>>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_html(mut self, html: impl Into<Vec<u8>>) -> Self {
        self.html = html.into();
        self
    }

    /// Validates the message and stamps the derived headers.
    ///
    /// Fails with [`Error::MissingSender`] / [`Error::MissingRecipients`]
    /// when the envelope is incomplete, and with
    /// [`Error::MultipartUnsupported`] when both bodies are non-empty,
    /// before touching any header.
    ///
    /// `Content-Type` is derived from which body is set (an empty message
    /// is `text/plain`) unless the caller already set one, in which case
    /// the caller's value wins. `Subject` is always passed through the
    /// word-encoder; `From` and `To` are the encoded address forms, `To`
    /// joined with `", "`. Stamping order is Content-Type, From, Subject,
    /// To, which is where a fresh message gets its header order from.
    pub fn finalize(&mut self) -> Result<(), Error> {
        let from = self.from.as_ref().ok_or(Error::MissingSender)?;
        if self.to.is_empty() {
            return Err(Error::MissingRecipients);
        }
        if !self.text.is_empty() && !self.html.is_empty() {
            return Err(Error::MultipartUnsupported);
        }

        if !self.headers.contains("Content-Type") {
            let content_type = if !self.html.is_empty() {
                "text/html; charset=UTF-8"
            } else {
                "text/plain; charset=UTF-8"
            };
            self.headers.set("Content-Type", content_type);
        }
        self.headers.set("From", from.encode());
        self.headers.set("Subject", encode_header(&self.subject));
        let to = self
            .to
            .iter()
            .map(Address::encode)
            .collect::<Vec<_>>()
            .join(", ");
        self.headers.set("To", to);
        Ok(())
    }

    /// Finalizes the message and writes its wire form: headers, one blank
    /// line, then the selected body. Returns the number of bytes written.
    pub fn write_to<W: Write>(&mut self, out: &mut W) -> Result<usize, Error> {
        self.finalize()?;
        let mut written = self.headers.write_to(out).map_err(Error::Write)?;
        let body = if !self.html.is_empty() {
            &self.html
        } else {
            &self.text
        };
        out.write_all(body).map_err(Error::Write)?;
        written += body.len();
        Ok(written)
    }

    /// Finalizes the message and returns its wire form as bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}
