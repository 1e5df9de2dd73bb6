//! # meeple-core
//!
//! Shared infrastructure for the meeple review API.
//!
//! This crate holds the pieces every other crate leans on:
//!
//! - **Query coercion**: the "ignore invalid input" rules applied uniformly
//!   to untrusted query parameters ([`params`])
//! - **Observability**: logging initialization ([`observability`])
//!
//! No HTTP and no SQL lives here; those belong to `meeple-api` and
//! `meeple-store` respectively.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

pub mod observability;
pub mod params;

pub use params::{coerce_or_default, PageParams, SortOrder};
