//! RFC 4122 version 4 UUIDs from a cryptographically secure source.
//!
//! ```
//! let id = uuid4::v4()?;               // "xxxxxxxx-xxxx-4xxx-[89ab]xxx-xxxxxxxxxxxx"
//! let bytes = uuid4::v4_bytes()?;      // 16 raw bytes
//! assert_eq!((bytes[6] >> 4) & 0x0f, 4);
//! assert_eq!(bytes[8] & 0xc0, 0x80);
//! ```
//!
//! Randomness comes from the operating system by default. Use
//! [`Uuid::new_v4_from`] with your own [`rand::SecureRandom`] to supply
//! another secure source.
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod rand;
pub mod uuid;

pub use crate::uuid::{to_canonical_string, Bytes, Uuid, CANONICAL_LEN};

/// Generates the 16 raw bytes of a new random UUID v4.
///
/// # Errors
///
/// Returns an `Unavailable` error when the operating system cannot provide
/// secure random bytes.
pub fn v4_bytes() -> error::Result<Bytes> {
    Uuid::new_v4().map(Uuid::into_bytes)
}

/// Generates a new random UUID v4 in canonical string form.
///
/// # Errors
///
/// Returns an `Unavailable` error when the operating system cannot provide
/// secure random bytes.
pub fn v4() -> error::Result<String> {
    let bytes = v4_bytes()?;
    Ok(to_canonical_string(&bytes))
}
