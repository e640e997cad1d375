//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `valuation` - From collected answers to an estimated price
//! - `conversation` - The step-by-step dialogue that collects the answers

pub mod conversation;
pub mod foundation;
pub mod valuation;
