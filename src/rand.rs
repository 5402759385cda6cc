//! Secure random sources.
//!
//! Identifier generation only ever needs one thing from its random source:
//! fill a buffer with cryptographically secure bytes. That capability is the
//! [`SecureRandom`] trait. [`OsRandom`] wires it to the operating system
//! generator; tests substitute deterministic sources.
//!
//! Implementations must be cryptographically secure. General-purpose
//! pseudo-random generators (`fastrand`, `SmallRng` and the like) produce
//! guessable identifiers and must not implement this trait.

use crate::error::Result;

/// A source of cryptographically secure random bytes.
pub trait SecureRandom {
    /// Fills `dest` entirely with secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Unavailable`](crate::error::ErrorKind::Unavailable)
    /// error when the source cannot deliver. Callers must not use `dest` in
    /// that case.
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: SecureRandom + ?Sized> SecureRandom for &mut R {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_random(dest)
    }
}

/// The operating system's secure random number generator.
///
/// Stateless: every value is equivalent and it can be freely copied between
/// threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
        let len = dest.len();
        getrandom::fill(dest).inspect_err(|e| {
            warn!("could not draw {len} bytes from os entropy source: {e}");
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_whole_buffer() {
        // 64 zero bytes in a row from a working CSPRNG is not going to happen.
        let mut buf = [0u8; 64];
        OsRandom.fill_random(&mut buf).unwrap();
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn os_random_draws_differ() {
        let mut first = [0u8; 16];
        let mut second = [0u8; 16];
        OsRandom.fill_random(&mut first).unwrap();
        OsRandom.fill_random(&mut second).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn mutable_reference_forwards() {
        struct Constant(u8);

        impl SecureRandom for Constant {
            fn fill_random(&mut self, dest: &mut [u8]) -> Result<()> {
                dest.fill(self.0);
                Ok(())
            }
        }

        fn fill_four<R: SecureRandom>(mut rng: R) -> [u8; 4] {
            let mut buf = [0u8; 4];
            rng.fill_random(&mut buf).unwrap();
            buf
        }

        let mut source = Constant(0xab);
        assert_eq!(fill_four(&mut source), [0xab; 4]);
        assert_eq!(fill_four(source), [0xab; 4]);
    }
}
