//! # blogboard
//!
//! Client library for a JWT-authenticated blog REST API: session state
//! backed by durable storage, login flow, auth header building, ownership
//! policy, and a posts resource client. The `cli/` crate is the command-line
//! front end built on top of this library.

pub mod auth;
pub mod config;
pub mod error;
pub mod net;
pub mod policy;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;
