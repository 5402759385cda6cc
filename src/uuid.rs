//! Version 4 UUIDs from a secure random source.
//!
//! Generation is two steps:
//! 1. Draw 16 bytes from a [`SecureRandom`] source and stamp the version and
//!    variant bits into them ([`Uuid::from_random_bytes`]).
//! 2. Render those bytes as the canonical hyphenated lowercase string
//!    ([`to_canonical_string`]).
//!
//! Only the second step is deterministic. The same bytes always render to
//! the same string, but every generated value is fresh.
//!
//! # Example
//! ```
//! let uuid = Uuid::new_v4()?;
//! assert_eq!(uuid.version_num(), 4);
//!
//! let id = uuid.to_string();
//! assert_eq!(id.len(), 36);
//! assert_eq!(&id[14..15], "4");
//! ```

use std::{fmt, ops::Deref};

use serde::{Serialize, Serializer};

use crate::{
    error::Result,
    rand::{OsRandom, SecureRandom},
};

/// Raw UUID value: exactly 16 bytes.
pub type Bytes = [u8; 16];

/// Length of the canonical string form, hyphens included.
pub const CANONICAL_LEN: usize = 36;

/// Offsets in the canonical string that hold a hyphen.
const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A UUID, stored as its 16 raw bytes.
///
/// This type implements `Deref` to [`Bytes`], so individual bytes can be
/// indexed directly.
///
/// # Example
/// ```
/// let uuid = Uuid::new_v4()?;
/// assert_eq!(uuid[6] >> 4, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uuid(Bytes);

/// Provides transparent access to the underlying bytes.
impl Deref for Uuid {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Uuid {
    /// Generates a new random UUID v4 from the operating system generator.
    ///
    /// # Errors
    ///
    /// Returns an `Unavailable` error when the operating system cannot
    /// provide secure random bytes.
    pub fn new_v4() -> Result<Self> {
        Self::new_v4_from(OsRandom)
    }

    /// Generates a new random UUID v4 from `rng`.
    ///
    /// Draws exactly 16 bytes in a single call.
    ///
    /// # Errors
    ///
    /// Returns whatever error `rng` fails with, unchanged. For well-behaved
    /// sources that is an `Unavailable` error.
    pub fn new_v4_from<R: SecureRandom>(mut rng: R) -> Result<Self> {
        let mut bytes = Bytes::default();
        rng.fill_random(&mut bytes)?;

        let uuid = Self::from_random_bytes(bytes);
        trace!("generated uuid {uuid}");

        Ok(uuid)
    }

    /// Builds a UUID v4 from 16 random bytes.
    ///
    /// The high nibble of byte 6 becomes the version (`0100`) and the two
    /// highest bits of byte 8 become the RFC 4122 variant (`10`). The other
    /// 122 bits are kept as given.
    #[must_use]
    pub const fn from_random_bytes(mut bytes: Bytes) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Self(bytes)
    }

    /// Wraps `bytes` without touching the version or variant bits.
    #[must_use]
    pub const fn from_bytes(bytes: Bytes) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    #[must_use]
    pub const fn into_bytes(self) -> Bytes {
        self.0
    }

    /// The version number stored in the high nibble of byte 6.
    #[must_use]
    pub const fn version_num(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Whether byte 8 carries the RFC 4122 variant (`10xxxxxx`).
    #[must_use]
    pub const fn is_rfc4122(&self) -> bool {
        self.0[8] & 0xc0 == 0x80
    }

    /// Renders the canonical string form; see [`to_canonical_string`].
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        to_canonical_string(&self.0)
    }
}

/// Renders 16 bytes as `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// Each byte becomes two lowercase hex digits, high nibble first. A hyphen
/// is written whenever the output reaches offset 8, 13, 18 or 23, so the
/// groups come out 8-4-4-4-12. The result is always [`CANONICAL_LEN`]
/// characters.
///
/// # Example
/// ```
/// let bytes = [
///     0x55, 0x0e, 0x84, 0x00, 0xe2, 0x9b, 0x41, 0xd4,
///     0xa7, 0x16, 0x44, 0x66, 0x55, 0x44, 0x00, 0x00,
/// ];
/// assert_eq!(to_canonical_string(&bytes), "550e8400-e29b-41d4-a716-446655440000");
/// ```
#[must_use]
pub fn to_canonical_string(bytes: &Bytes) -> String {
    let mut out = String::with_capacity(CANONICAL_LEN);

    // Only ASCII is written, so the byte length is the output cursor.
    for &byte in bytes {
        if HYPHEN_OFFSETS.contains(&out.len()) {
            out.push('-');
        }

        out.push(hex_digit(byte >> 4));
        out.push(hex_digit(byte));
    }

    out
}

/// Lowercase hex digit for the low nibble of `value`.
fn hex_digit(value: u8) -> char {
    char::from(HEX_DIGITS[usize::from(value & 0x0f)])
}

/// Formats the UUID in its canonical hyphenated lowercase form.
///
/// # Example
/// ```
/// let uuid = Uuid::new_v4()?;
/// println!("{}", uuid); // e.g., "550e8400-e29b-41d4-a716-446655440000"
/// ```
impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

/// Serializes as the canonical string.
impl Serialize for Uuid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl From<Uuid> for Bytes {
    fn from(value: Uuid) -> Self {
        value.0
    }
}

/// Converts this `Uuid` into a `uuid::Uuid`.
///
/// This hands generated values to crates that speak the `uuid` crate's type
/// without going through a string.
impl From<Uuid> for uuid::Uuid {
    fn from(value: Uuid) -> Self {
        uuid::Uuid::from_bytes(value.0)
    }
}
