//! Order keys for columns and tasks using fractional indexing.
//!
//! An [`Ordinal`] is a string over the 62 digits `0-9A-Za-z`. ASCII order of
//! the digits matches their numeric order, so ordinals compare with plain
//! string comparison and read as base-62 fractions after an implied point.
//! A key never ends in the zero digit, which guarantees there is always room
//! in front of any key.
//!
//! Inserting between two keys takes the midpoint of the first differing
//! digit, and only appends a digit when the neighbours are adjacent. Repeated
//! insertion at the same spot grows the key by roughly one character per five
//! insertions; there is no precision ceiling.

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: usize = DIGITS.len();
const ZERO: u8 = b'0';

fn digit_value(byte: u8) -> Option<usize> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as usize),
        b'A'..=b'Z' => Some((byte - b'A') as usize + 10),
        b'a'..=b'z' => Some((byte - b'a') as usize + 36),
        _ => None,
    }
}

/// Midpoint of two validated keys; `lower` may be empty, `upper` absent.
///
/// Requires `lower < upper` and that neither ends in the zero digit.
fn midpoint(lower: &[u8], upper: Option<&[u8]>) -> Vec<u8> {
    if let Some(upper) = upper {
        // lower is padded with zero digits while looking for a shared prefix
        let shared = upper
            .iter()
            .enumerate()
            .take_while(|(i, digit)| lower.get(*i).copied().unwrap_or(ZERO) == **digit)
            .count();
        if shared > 0 {
            let mut key = upper[..shared].to_vec();
            key.extend(midpoint(
                lower.get(shared..).unwrap_or(&[]),
                Some(&upper[shared..]),
            ));
            return key;
        }
    }

    let lo = lower.first().and_then(|b| digit_value(*b)).unwrap_or(0);
    let hi = upper
        .and_then(|u| u.first())
        .and_then(|b| digit_value(*b))
        .unwrap_or(BASE);

    if hi.saturating_sub(lo) > 1 {
        return vec![DIGITS[(lo + hi) / 2]];
    }

    match upper {
        Some(upper) if upper.len() > 1 => vec![upper[0]],
        _ => {
            let mut key = vec![DIGITS[lo]];
            key.extend(midpoint(lower.get(1..).unwrap_or(&[]), None));
            key
        }
    }
}

fn from_digits(digits: Vec<u8>) -> String {
    digits.into_iter().map(char::from).collect()
}

/// Ordering among siblings (tasks in a column, columns on a board).
///
/// Ordinals are strings that sort lexicographically to determine display order.
/// This allows inserting between existing items without updating other positions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ordinal(String);

impl Ordinal {
    /// The middle key, used for the first entry of an empty collection
    pub fn first() -> Self {
        Self(from_digits(midpoint(&[], None)))
    }

    /// Key that sorts after `last`
    pub fn after(last: &Ordinal) -> Self {
        Self(from_digits(midpoint(last.0.as_bytes(), None)))
    }

    /// Key that sorts before `first`
    pub fn before(first: &Ordinal) -> Self {
        Self(from_digits(midpoint(&[], Some(first.0.as_bytes()))))
    }

    /// Key strictly between `before` and `after`.
    ///
    /// A missing bound means "open on that side": `(None, Some(x))` sorts before
    /// `x`, `(Some(x), None)` sorts after `x`, and `(None, None)` is
    /// [`Ordinal::first`]. Passing bounds out of order is a caller bug and
    /// returns [`BoardError::OrderingViolation`].
    pub fn between(before: Option<&Ordinal>, after: Option<&Ordinal>) -> Result<Self> {
        if let (Some(before), Some(after)) = (before, after) {
            if before >= after {
                error!(%before, %after, "ordering contract violated");
                return Err(BoardError::OrderingViolation {
                    before: before.0.clone(),
                    after: after.0.clone(),
                });
            }
        }

        let lower = before.map_or(&[][..], |o| o.0.as_bytes());
        let upper = after.map(|o| o.0.as_bytes());
        Ok(Self(from_digits(midpoint(lower, upper))))
    }

    /// `count` ascending keys, for seeding a fresh collection
    pub fn sequence(count: usize) -> Vec<Ordinal> {
        let mut keys: Vec<Ordinal> = Vec::with_capacity(count);
        for _ in 0..count {
            let next = match keys.last() {
                Some(last) => Ordinal::after(last),
                None => Ordinal::first(),
            };
            keys.push(next);
        }
        keys
    }

    /// Validate a key coming from outside (files, the data-fetch layer)
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let invalid = |reason: &str| BoardError::InvalidOrdinal {
            value: value.clone(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("empty"));
        }
        if value.bytes().any(|b| digit_value(b).is_none()) {
            return Err(invalid("only 0-9, A-Z and a-z are allowed"));
        }
        if value.ends_with(ZERO as char) {
            return Err(invalid("must not end with '0'"));
        }
        Ok(Self(value))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Ordinal {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ordinal {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Ordinal> for String {
    fn from(ordinal: Ordinal) -> Self {
        ordinal.0
    }
}
