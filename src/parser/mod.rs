//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a `Program`. It handles:
//!
//! - Top-level structure per dialect (namespaces, classes, global methods, imports)
//! - Statement parsing, dispatched on the current token and one token of lookahead
//! - Flat expressions and conditions (one operator at most, no nesting)
//!
//! Any unmet expectation aborts the parse with an error naming what was
//! expected and what was found. There is no error recovery.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
