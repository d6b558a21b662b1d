pub mod cipher;
pub mod literal;
pub mod routines;

pub use cipher::{XorCipher, DEFAULT_KEY};
pub use literal::{decode, encode, SkipReason};
pub use routines::{decrypt_call, decrypt_routine, C_HEADERS, DECRYPT_FN};
