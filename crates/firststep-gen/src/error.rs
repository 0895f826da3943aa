//! Error type for RISC-V assembly emission.
//!
//! Every variant here corresponds to an IR invariant (spec.md §3) that
//! `firststep-ir` should already guarantee; they exist as a defensive
//! backstop rather than something well-formed IR is expected to trigger.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    /// A `Call` instruction named a function absent from both the
    /// module's user functions and its library declarations.
    #[error("unknown callee '{0}'")]
    UnknownCallee(String),

    /// A virtual register was read or written that the owning
    /// function's `vregs` list never recorded.
    #[error("virtual register {0} not registered with its function")]
    UnregisteredVirtReg(u32),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
