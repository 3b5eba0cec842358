//! Mailbox addresses with an optional display name.

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::utils::{encode_header, needs_encoding};

/// A single sender or recipient: an optional display name plus a
/// `user@domain` mailbox.
///
/// The mailbox is checked structurally on construction (non-empty, exactly
/// one `@`, non-empty local and domain parts); no DNS is involved. Two
/// addresses compare equal when their mailbox strings are identical,
/// case-sensitively; the display name is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    name: Option<String>,
    mailbox: String,
}

impl Address {
    /// Creates an address without a display name.
    pub fn new(mailbox: impl Into<String>) -> Result<Self, Error> {
        let mailbox = mailbox.into();
        check_mailbox(&mailbox)?;
        Ok(Self {
            name: None,
            mailbox,
        })
    }

    /// Creates an address with a display name.
    pub fn with_name(name: impl Into<String>, mailbox: impl Into<String>) -> Result<Self, Error> {
        let mut address = Self::new(mailbox)?;
        address.name = Some(name.into());
        Ok(address)
    }

    /// Parses `Name <user@domain>`, `<user@domain>` or a bare `user@domain`.
    ///
    /// Only the split between display name and addr-spec is handled here; a
    /// quoted display name loses its surrounding quotes. Anything fancier is
    /// out of scope.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        if let Some(open) = raw.rfind('<') {
            let rest = &raw[open + 1..];
            let close = rest
                .find('>')
                .ok_or_else(|| Error::InvalidAddress(raw.to_string()))?;
            if !rest[close + 1..].trim().is_empty() {
                return Err(Error::InvalidAddress(raw.to_string()));
            }
            let name = raw[..open].trim().trim_matches('"').trim();
            let mailbox = rest[..close].trim();
            if name.is_empty() {
                Self::new(mailbox)
            } else {
                Self::with_name(name, mailbox)
            }
        } else {
            Self::new(raw)
        }
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The bare `user@domain` mailbox.
    pub fn mailbox(&self) -> &str {
        &self.mailbox
    }

    /// Canonical header form: `Name <user@domain>` when a display name is
    /// present, else the bare mailbox.
    ///
    /// The display name is word-encoded when it contains non-ASCII or
    /// header-unsafe bytes, and emitted as a quoted-string when it contains
    /// phrase specials; the mailbox is never encoded.
    pub fn encode(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => {
                format!("{} <{}>", encode_display_name(name), self.mailbox)
            }
            _ => self.mailbox.clone(),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.mailbox == other.mailbox
    }
}

impl Eq for Address {}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

fn check_mailbox(mailbox: &str) -> Result<(), Error> {
    let mut parts = mailbox.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::InvalidAddress(mailbox.to_string())),
    }
}

fn encode_display_name(name: &str) -> String {
    if needs_encoding(name) {
        return encode_header(name);
    }
    if name.chars().all(|c| c == ' ' || is_atext(c)) {
        return name.to_string();
    }
    // printable ASCII with phrase specials: quoted-string
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

// RFC 5322 atext
fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}
