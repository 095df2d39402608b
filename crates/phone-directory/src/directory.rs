//! Phone number keys and directory entries.

use serde::Serialize;
use std::fmt;

/// A phone number in canonical E.164 form (e.g., "+14155551234").
///
/// The only way to obtain a `PhoneKey` is through [`PhoneKey::parse`], so
/// every key that reaches the store has been normalized: two spellings of
/// the same number always produce the identical key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneKey(String);

impl PhoneKey {
    /// Parse and normalize a raw phone number into its E.164 key.
    ///
    /// Accepts customary separators (spaces, dashes, dots, parentheses) and
    /// either a leading `+` or the `00` international dial prefix. Numbers
    /// without an explicit prefix are accepted when they already carry a
    /// country code (10 or more digits); shorter national-format input is
    /// rejected rather than guessed at.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let (mut has_prefix, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(format!("Unexpected character {:?} in phone number", c)),
            }
        }

        // "00" dialed internationally means the same as "+"
        if !has_prefix && digits.starts_with("00") {
            digits.drain(..2);
            has_prefix = true;
        }

        if digits.is_empty() {
            return Err("Phone number must contain digits".into());
        }
        if digits.len() < 7 {
            return Err("Phone number too short".into());
        }
        if digits.len() > 15 {
            return Err("Phone number too long".into());
        }
        if digits.starts_with('0') {
            return Err("Country calling code cannot start with 0".into());
        }

        if has_prefix || digits.len() >= 10 {
            Ok(PhoneKey(format!("+{}", digits)))
        } else {
            Err("Phone number must include a country code".into())
        }
    }

    /// The canonical key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directory entry: one phone key mapped to one postal address.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    /// The phone number in E.164 format
    pub phone: PhoneKey,

    /// The postal address stored for it
    pub address: String,
}
