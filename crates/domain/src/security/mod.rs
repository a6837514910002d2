pub mod nonce;

pub use nonce::NonceKey;
