//! Tokenizing and filtering of tmer-style reaction definition files.

pub mod expand;
pub mod filter;
