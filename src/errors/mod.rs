//! Error types and error handling for the compiler.
//!
//! Every stage reports failures through one `Error` type:
//!
//! - Error structures with source position information
//! - Specific error variants for tokenizing, parsing and code generation
//! - Error names and suggestions for diagnostics

pub mod errors;
