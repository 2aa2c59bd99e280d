//! REST adapters for the core collection ports

pub mod rest;

pub use rest::RestCollection;
