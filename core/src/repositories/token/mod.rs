//! Refresh token persistence interface and its in-memory double

pub mod mock;
pub mod r#trait;

pub use mock::MockRefreshTokenRepository;
pub use r#trait::RefreshTokenRepository;
