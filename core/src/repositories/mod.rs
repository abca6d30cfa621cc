//! Repository traits and in-memory test doubles.
//!
//! Database-backed implementations live in the infra crate; the mocks here
//! are deliberately public so integration tests can wire services without a
//! database.

pub mod token;
pub mod user;

pub use token::{MockRefreshTokenRepository, RefreshTokenRepository};
pub use user::{MockUserRepository, UserRepository};
