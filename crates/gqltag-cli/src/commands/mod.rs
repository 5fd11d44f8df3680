pub mod parse;
pub mod symbols;
pub mod validate;
