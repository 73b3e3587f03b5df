//! Remote persistence adapter
//!
//! Hosted authentication plus REST CRUD against the backend's relational
//! tables (`profiles`, `expenses`, `savings_goals`, `user_achievements`).

pub mod auth;
pub mod client;
pub mod session;

pub use auth::AuthClient;
pub use client::RemoteClient;
pub use session::Session;
