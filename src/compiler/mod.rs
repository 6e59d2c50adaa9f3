//! Code generation module for the compiler.
//!
//! This module lowers the AST into BatPU-2 assembly text. It handles:
//!
//! - Storage allocation for variables and parameters
//! - Control flow lowering with inverted conditions and unique labels
//! - Arithmetic lowering, including calls into synthesized MUL/DIV/MOD routines
//! - Argument marshalling into the call registers

pub mod compiler;
pub mod expr;
pub mod isa;
pub mod stdlib;
pub mod stmt;
pub mod storage;

#[cfg(test)]
mod tests;
