//! Error types for the front end.
//!
//! All errors are fatal: the first one aborts the current parse and is
//! surfaced to the caller with the offending position. This module holds:
//!
//! - The `Error` wrapper carrying source position information
//! - The specific error variants for lexing and parsing
//! - Suggestion text for human-readable presentation

pub mod errors;

#[cfg(test)]
mod tests;
