//! Governance Payload Codec Library
//!
//! Binary wire formats for carrying a Solana instruction across chains as a
//! governance payload. Two formats are supported:
//! - `lz`: LayerZero governance messages (full, targeted and raw body forms)
//! - `wh`: Wormhole general purpose governance VAA payloads
//!
//! Both encode accounts with the shared `account_meta` layout and use
//! `sentinel` placeholder keys for accounts only known at execution time.
pub mod account_meta;
pub mod error;
pub mod lz;
mod primitives;
pub mod sentinel;
pub mod wh;

// Re-export commonly used types
pub use account_meta::{decode_account, encode_account, SERIALIZED_ACCOUNT_LEN};
pub use error::{CodecError, Result};
pub use lz::LzGovernanceMessage;
pub use sentinel::{sentinel_address, sentinel_pubkey};
pub use wh::WhGovernanceMessage;
