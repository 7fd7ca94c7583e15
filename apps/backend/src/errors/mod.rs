//! Error handling for the TaskVault backend.

pub mod domain;

pub use domain::DomainError;
