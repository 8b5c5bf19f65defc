//! # Application Services
//!
//! The external interfaces of the application, written as free async
//! functions over an injected [`crate::store::DocumentStore`]. Each function
//! corresponds to one API operation; identity arrives as an already-verified
//! user id, and mutating operations gate on household membership.

pub mod households;
pub mod planning;
pub mod recipes;
pub mod shopping;
