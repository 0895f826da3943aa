//! Stage-tagged diagnostic reporting.
//!
//! spec.md §7 names four error kinds — lexical, syntactic,
//! semantic-interpret, semantic-ir — and requires each to: print one line
//! to the error sink, bump a per-stage counter, and let the caller
//! propagate absence-of-value without further noise. [`Stage`] is that
//! kind; [`Handler`] is the shared sink every stage reports through.

use std::cell::RefCell;
use std::fmt;

use crate::span::{SourceMap, Span};

/// Which pipeline stage raised a diagnostic, per spec.md §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
    Interpreter,
    IrGen,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lexer => "lexer",
            Stage::Parser => "parser",
            Stage::Interpreter => "interpreter",
            Stage::IrGen => "irgen",
        };
        f.write_str(name)
    }
}

/// One reported error: always error-level in this toolchain (spec.md §7
/// has no warning concept), so the type carries just stage + message + span.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error({}): {}", self.stage, self.message)
    }
}

/// Collects diagnostics from every stage sharing one compilation session.
///
/// `error_num(stage)` backs the exit-status arithmetic in spec.md §6:
/// interpreting sums lexer + parser + interpreter counts on failure,
/// compiling sums lexer + parser + irgen counts.
///
/// Holds the [`SourceMap`] for the file being compiled, if the caller has
/// one (the driver does; a bare unit test usually doesn't): when present,
/// `emit` resolves a diagnostic's `span` to a `path:line:col` prefix
/// instead of printing just the stage and message.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    source_map: Option<SourceMap>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            source_map: None,
        }
    }

    /// A handler that resolves reported spans against `source_map` when
    /// printing, matching `faxc-util`'s source-map-backed diagnostics.
    pub fn with_source_map(source_map: SourceMap) -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            source_map: Some(source_map),
        }
    }

    /// Report an error and return the diagnostic's position for chaining.
    pub fn error(&self, stage: Stage, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic {
            stage,
            message: message.into(),
            span,
        });
    }

    pub fn emit(&self, diag: Diagnostic) {
        match &self.source_map {
            Some(sm) if diag.span != Span::DUMMY => {
                let (line, col) = sm.line_col(diag.span.start);
                eprintln!("{}:{}:{}: {}", sm.path.display(), line, col, diag);
            }
            _ => eprintln!("{}", diag),
        }
        self.diagnostics.borrow_mut().push(diag);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    pub fn error_num(&self, stage: Stage) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.stage == stage)
            .count()
    }

    pub fn total_error_num(&self, stages: &[Stage]) -> usize {
        stages.iter().map(|s| self.error_num(*s)).sum()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
