pub mod catalogs;
pub mod ffi;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod types;
pub mod validator;

pub use catalogs::PARSER_VERSION;
pub use ffi::{parse_to_json, symbols_to_json, validate_to_json};
pub use parser::{parse_directives, parse_document, parse_tag_options, parse_tags};
pub use symbols::{build_validation_context, ScopeResolver, StructScopes};
pub use types::*;
pub use validator::{validate_directive, validate_document, validate_tag};
