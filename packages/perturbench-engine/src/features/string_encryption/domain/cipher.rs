//! Byte-wise XOR cipher
//!
//! XOR with a key in `1..=127` maps ASCII onto ASCII, so the encrypted
//! payload can always be written back as an escaped ASCII literal.

pub const DEFAULT_KEY: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorCipher {
    key: u8,
}

impl Default for XorCipher {
    fn default() -> Self {
        Self { key: DEFAULT_KEY }
    }
}

impl XorCipher {
    pub fn new(key: u8) -> Self {
        Self { key }
    }

    pub fn key(&self) -> u8 {
        self.key
    }

    /// Encrypts and decrypts alike
    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        bytes.iter().map(|b| b ^ self.key).collect()
    }
}
