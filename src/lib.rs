//! Tidemark - Storage-Backed Rate Limiting
//!
//! This crate implements a fixed-window rate limiter that keeps all of its
//! state in an external key-value store. Any number of processes sharing a
//! store share one view of each caller's window, so the limiter itself stays
//! stateless and is safe to share across concurrent tasks.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod store;
