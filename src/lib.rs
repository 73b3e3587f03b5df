//! Spendwise - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for the Spendwise expense
//! tracker. Expenses, savings goals, a monthly budget threshold, and earned
//! achievements work the same whether data lives in local JSON files (guest
//! mode) or behind a hosted account; signing in merges guest data into the
//! account.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, goals, profile, achievements)
//! - `storage`: JSON file storage layer for guest mode
//! - `remote`: Auth and REST clients for the hosted backend
//! - `store`: The persistence seam both modes implement
//! - `services`: Business logic layer
//! - `events`: Append-only event log
//! - `ai`: AI-assisted categorization and budgeting advice
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwise::config::{paths::SpendwisePaths, settings::Settings};
//!
//! let paths = SpendwisePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod export;
pub mod models;
pub mod remote;
pub mod services;
pub mod storage;
pub mod store;

pub use error::SpendwiseError;
