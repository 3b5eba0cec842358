//! Ordered, case-insensitive header map with a CRLF wire serialization.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// An ordered mapping of header name to value.
///
/// Lookups are case-insensitive; insertion order and the casing of the
/// first insertion are preserved. `set` on an existing name replaces the
/// value in place instead of appending a duplicate line.
///
/// Header values must not contain raw line breaks; callers encode values
/// before setting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace-or-insert, keeping the first-seen position and casing.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        debug_assert!(
            !value.contains('\r') && !value.contains('\n'),
            "header values must not contain line breaks"
        );
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Writes each header as `Name: value\r\n` in insertion order, followed
    /// by the blank line separating headers from body. Returns the number of
    /// bytes written. No folding is performed.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<usize> {
        let mut written = 0;
        for (name, value) in &self.entries {
            let line = format!("{name}: {value}\r\n");
            out.write_all(line.as_bytes())?;
            written += line.len();
        }
        out.write_all(b"\r\n")?;
        Ok(written + 2)
    }
}
