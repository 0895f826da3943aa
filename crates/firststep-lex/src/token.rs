//! Token kinds for the firststep language (spec.md §3, §4.1).
//!
//! Unlike the C++ ancestor's `Token` (a tag plus a handful of side-channel
//! accessors — `id_val()`, `int_val()`, `key_val()`, `op_val()`,
//! `other_val()`), this `Token` just carries its payload in the variant.

use firststep_util::Symbol;

/// A lexed token. `Error` and `End` carry no payload; everything else does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Lexing failed on this token; the lexer already reported a diagnostic.
    Error,
    /// End of input.
    End,
    Id(Symbol),
    Integer(i32),
    Keyword(Keyword),
    Operator(Operator),
    /// Any other single-character token (`( ) { } ,`) that the grammar
    /// matches on literally rather than by a dedicated tag.
    Other(char),
}

/// Reserved words. Spellings are the single source of truth for both the
/// lexer's identifier-vs-keyword check and any diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    Return,
}

impl Keyword {
    pub const ALL: [(&'static str, Keyword); 3] = [
        ("if", Keyword::If),
        ("else", Keyword::Else),
        ("return", Keyword::Return),
    ];

    pub fn lookup(text: &str) -> Option<Keyword> {
        Self::ALL
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|(_, kw)| *kw)
    }

    pub fn spelling(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, kw)| *kw == self)
            .map(|(spelling, _)| *spelling)
            .expect("every Keyword variant is in ALL")
    }
}

/// Operators, longest spelling first within each leading character so
/// maximal-munch matching (spec.md §4.1) never has to backtrack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    LessEq,
    Eq,
    NotEq,
    LAnd,
    LOr,
    LNot,
    Define,
    Assign,
}

impl Operator {
    pub const ALL: [(&'static str, Operator); 14] = [
        ("+", Operator::Add),
        ("-", Operator::Sub),
        ("*", Operator::Mul),
        ("/", Operator::Div),
        ("%", Operator::Mod),
        ("<=", Operator::LessEq),
        ("<", Operator::Less),
        ("==", Operator::Eq),
        ("!=", Operator::NotEq),
        ("&&", Operator::LAnd),
        ("||", Operator::LOr),
        ("!", Operator::LNot),
        (":=", Operator::Define),
        ("=", Operator::Assign),
    ];

    /// Characters that can appear in an operator run (spec.md §4.1).
    ///
    /// spec.md's prose names `+-*/%<=!&|`, but `Define`'s own spelling is
    /// `:=` — without `:` in this set `:=` could never be lexed as a single
    /// run and would split into `Other(':')` + `Operator(Assign)`, which
    /// would reject every `:=` in the language (S3/S4/S6 all use it). `:`
    /// is included so the maximal-munch rule actually reaches `Define`.
    pub fn is_operator_char(c: char) -> bool {
        matches!(c, '+' | '-' | '*' | '/' | '%' | '<' | '=' | '!' | '&' | '|' | ':')
    }

    pub fn lookup(text: &str) -> Option<Operator> {
        Self::ALL
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|(_, op)| *op)
    }

    pub fn spelling(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(spelling, _)| *spelling)
            .expect("every Operator variant is in ALL")
    }
}
