//! User persistence interface and its in-memory double

pub mod mock;
pub mod r#trait;

pub use mock::MockUserRepository;
pub use r#trait::UserRepository;

#[cfg(test)]
mod tests;
