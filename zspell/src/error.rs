//! Error types returned by the parsers and by [`crate::DictBuilder::build`].

use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// Top-level error type for anything that can go wrong building a [`crate::Dictionary`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("error parsing affix file: {0}")]
    Affix(#[from] ParseError),
    #[error("error parsing dictionary file: {0}")]
    Dict(#[from] DictParseError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("builder is missing required input: {0}")]
    MissingInput(&'static str),
}

/// A single error encountered while parsing an `.aff` file, with line/column context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorType,
    pub line: u32,
    pub col: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorType, line: u32, col: u32) -> Self {
        Self { kind, line, col }
    }

    /// Build an error with no span information yet; spans are filled in by
    /// [`Self::add_offset_ret`] as the error propagates up through the line-munching
    /// combinators.
    pub fn new_nospan(kind: ParseErrorType) -> Self {
        Self { kind, line: 0, col: 0 }
    }

    /// Add a line/column offset to an error that was constructed without span info
    /// (or relative to a nested parse). Used while unwinding out of `parse_affix`.
    pub fn add_offset_ret(mut self, line: u32, col: u32) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self.col += col;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseErrorType> for ParseError {
    fn from(kind: ParseErrorType) -> Self {
        Self::new_nospan(kind)
    }
}

/// The specific kind of problem encountered parsing one affix directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorType {
    #[error("expected a boolean flag for '{key}' but found '{s}'")]
    Bool { s: String, key: String },
    #[error("expected exactly one character but found {count} in '{s}'")]
    Char { count: usize, s: String },
    #[error("expected an integer but found '{s}': {e}")]
    Int { s: String, e: String },
    #[error("expected {expected} characters in '{s}'")]
    CharCount { s: String, expected: usize },
    #[error("value '{0}' contains whitespace")]
    ContainsWhitespace(String),
    #[error("expected {expected} table rows, found {received}")]
    TableCount { expected: u32, received: u32 },
    #[error("unexpected non-whitespace character '{0}' at end of directive line")]
    NonWhitespace(char),
    #[error("malformed affix rule body: '{0}'")]
    AffixBody(String),
    #[error("affix rule flag mismatch in '{s}', expected flag '{flag}'")]
    AffixFlagMismatch { s: String, flag: String },
    #[error("expected 'Y' or 'N' for cross-product, found '{0}'")]
    AffixCrossProduct(String),
    #[error("invalid encoding: {0}")]
    Encoding(String),
    #[error("invalid flag encoding: {0}")]
    Flag(String),
    #[error("invalid phonetic table entry: {0}")]
    Phonetic(String),
    #[error("invalid compound pattern: {0}")]
    CompoundPattern(String),
    #[error("invalid compound syllable directive: {0}")]
    CompoundSyllable(String),
    #[error("invalid morph info field: {0}")]
    MorphInfo(String),
    #[error("invalid condition pattern: {0}")]
    Condition(String),
    #[error("unclosed quantity table; expected a row count before contents")]
    UnclosedTable,
}

impl ParseErrorType {
    pub(crate) fn new_bool(s: &str, key: &str) -> Self {
        Self::Bool { s: s.to_owned(), key: key.to_owned() }
    }
    pub(crate) fn new_char(count: usize, s: &str) -> Self {
        Self::Char { count, s: s.to_owned() }
    }
    pub(crate) fn new_int(s: &str, e: ParseIntError) -> Self {
        Self::Int { s: s.to_owned(), e: e.to_string() }
    }
}

/// Errors encountered parsing a `.dic` lexicon file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictParseError {
    #[error("line {line}: expected a word count header, found '{found}'")]
    HeaderCount { line: u32, found: String },
    #[error("line {line}: could not parse entry '{entry}': {reason}")]
    Entry { line: u32, entry: String, reason: String },
    #[error("line {line}: unknown flag '{flag}' referenced (not declared by any AF alias or bare in affix file)")]
    UnknownFlag { line: u32, flag: String },
    #[error("line {line}: alias index {idx} out of range ({max} aliases declared)")]
    AliasRange { line: u32, idx: u32, max: u32 },
}
