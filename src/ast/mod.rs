/// AST (Abstract Syntax Tree) module
/// Contains the typed node model and the generic tree utilities
///
/// Submodules:
/// - ast: Root, statement and expression enums
/// - expressions: Record types for expression nodes
/// - statements: Record types for statement nodes
/// - types: Operators, contexts, slices and other support nodes
/// - fields: Ordered field reflection over any node
/// - visitor: Read-only traversal
/// - transformer: Owning rewrites
/// - dump: Debug serializer
pub mod ast;
pub mod dump;
pub mod expressions;
pub mod fields;
pub mod statements;
pub mod transformer;
pub mod types;
pub mod visitor;

pub use dump::dump;
pub use fields::{iter_child_nodes, leaf_count, FieldValue, NodeRef};
