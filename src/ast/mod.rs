/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, namespace, class and method nodes
/// - expressions: Operands, flat binary expressions and conditions
/// - statements: The closed set of statement kinds
pub mod ast;
pub mod expressions;
pub mod statements;
