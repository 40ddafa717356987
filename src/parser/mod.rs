//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser: every token kind
//! may own a prefix production and/or an infix production, and expression
//! nesting is driven by comparing a minimum precedence against the
//! precedence of the upcoming infix production. It handles:
//!
//! - Expression parsing (literals, operators, assignment, calls)
//! - Keyword-terminated block constructs (if/unless, case/when,
//!   class/module/def, begin/rescue/ensure/else, do-blocks)
//!
//! The lookup tables mapping token kinds to productions are populated
//! once before parsing begins and are read-only afterwards.

pub mod blocks;
pub mod expr;
pub mod lookups;
pub mod parser;
