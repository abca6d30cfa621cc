//! Tests for the verification token service

#[cfg(test)]
mod service_tests;
