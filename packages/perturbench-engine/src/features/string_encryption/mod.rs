//! String Encryption Feature (Level 4)
//!
//! ## Structure
//! - `domain/` - literal decoding, XOR cipher, decryption routines
//! - `application/` - StringEncryptor

pub mod application;
pub mod domain;

pub use application::{EncryptionOutcome, EncryptionReport, SkippedLiteral, StringEncryptor};
pub use domain::{SkipReason, XorCipher, DEFAULT_KEY};
