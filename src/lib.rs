//! citygate — frontend-facing gateway for city submissions.
//!
//! Receives a user's city, validates it (non-empty after trimming), and
//! forwards it to the normalization backend. When the backend cannot answer,
//! the gateway degrades to a locally synthesized result instead of failing
//! the caller, so the service stays usable without the backend running.

pub mod config;
pub mod gateway;
pub mod upstream;
