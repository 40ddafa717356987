/// AST (Abstract Syntax Tree) module
/// Contains the node model the parser produces
///
/// Submodules:
/// - ast: the closed set of node variants and their fields
pub mod ast;
