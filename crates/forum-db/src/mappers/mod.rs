//! Model to entity mappers
//!
//! `From<Model> for Entity` for rows that always map cleanly, and fallible
//! conversions where a column holds an encoded value.

mod account;
mod comment;
mod post;
mod reaction;
