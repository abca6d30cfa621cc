//! Security module - password hashing implementations.

pub mod password;

pub use password::BcryptPasswordHasher;
