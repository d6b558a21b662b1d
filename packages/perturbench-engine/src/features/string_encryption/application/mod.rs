pub mod encryptor;

pub use encryptor::{EncryptionOutcome, EncryptionReport, SkippedLiteral, StringEncryptor};
