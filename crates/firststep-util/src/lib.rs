//! firststep-util - Shared foundation types for the firststep toolchain.
//!
//! Every later stage (lexer, parser, interpreter, IR generator, assembly
//! emitter, driver) builds on top of the three things this crate provides:
//!
//! - [`Symbol`] — interned identifier handles, so names compare in O(1)
//!   instead of doing string comparisons all the way down the pipeline.
//! - [`Span`] / [`SourceMap`] — byte ranges into source text, resolved back
//!   to `path:line:col` by [`Handler`] when a diagnostic's span isn't
//!   [`Span::DUMMY`], the same location-on-top-of-a-bare-message rendering
//!   `faxc-util` gives its own diagnostics.
//! - [`diagnostic`] — the one-line, stage-tagged, counted error reporting
//!   discipline shared by every stage (spec.md §7).

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Stage};
pub use index_vec::{Idx, IndexVec};
pub use span::{SourceMap, Span};
pub use symbol::Symbol;
