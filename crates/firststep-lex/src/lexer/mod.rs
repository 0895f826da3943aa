//! Lexer implementation, split the way `faxc-lex` splits its own:
//! - `core` - the `Lexer` struct and `next_token` dispatch
//! - `identifier` - identifier/keyword scanning
//! - `number` - integer literal scanning
//! - `operator` - operator run scanning
//! - `comment` - `#` line comments

mod comment;
mod core;
mod identifier;
mod number;
mod operator;

pub use core::Lexer;
