//! Save-state string ciphers and the deterministic generator behind the
//! complex cipher and the `?` operator.

pub mod cipher;
pub mod random;

pub use cipher::{Cipher, CipherMode};
pub use random::RandomGenerator;
