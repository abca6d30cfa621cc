//! Token service module
//!
//! Everything that touches session credentials directly:
//! - HS256 signing and kind-checked verification of compact tokens
//! - The server-side refresh token store (keyed hashes, rotation, revocation)
//! - Expired-record sweeps

mod codec;
mod config;
mod store;


pub use codec::SignedTokenCodec;
pub use config::TokenConfig;
pub use store::RefreshTokenStore;
