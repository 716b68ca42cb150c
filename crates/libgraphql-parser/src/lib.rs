//! Lexer, parser, and AST for the GraphQL query language and Schema
//! Definition Language.
//!
//! This crate has no dependency on any schema or execution model: it turns
//! source text into a typed, spanned AST and back, nothing else.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod source_position;
pub mod token;
pub mod visitor;

pub use error::SyntaxError;
pub use parser::parse_document;
pub use parser::parse_query;
pub use parser::parse_schema;
pub use parser::Parser;
pub use parser::ParserOptions;
pub use printer::print_ast;
pub use printer::print_value;
pub use source_position::SourcePosition;
pub use source_position::Span;
