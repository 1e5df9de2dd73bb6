//! HTTP layer of the meeple review API.
//!
//! Routes, the self-describing endpoint catalog served from `/api`, the
//! error taxonomy, and server wiring. Persistence lives in `meeple-store`;
//! this crate only translates HTTP in and out of it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

pub mod body;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod openapi;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;
