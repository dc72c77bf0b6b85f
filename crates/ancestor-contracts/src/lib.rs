//! # ancestor-contracts
//!
//! Shared record types, audit steps, verification reports, and the unified
//! error type for the Ancestor trust simulation.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions and error types.

pub mod audit;
pub mod citation;
pub mod error;
pub mod verify;
