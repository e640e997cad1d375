//! Sales Predictor - Conversational Real-Estate Valuation
//!
//! This crate guides a user through a short question-and-answer dialogue
//! about a property, derives the features a fitted regression model needs,
//! and reports an estimated price alongside comparable market listings.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
