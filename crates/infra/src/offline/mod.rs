//! Offline/demo data
//!
//! Deterministic seed records for the per-domain fallback datasets. Seeds
//! use fixed identifiers and timestamps so two processes (or two test runs)
//! degrade to exactly the same dataset.

pub mod seeds;
