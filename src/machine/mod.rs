//! Reference BatPU-2 machine.
//!
//! Assembles the text the compiler emits and executes it, so generated
//! programs can be checked by running them rather than by reading them.

pub mod assembly;
pub mod error;
pub mod machine;
