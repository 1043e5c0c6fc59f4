//! ShEx compact-syntax tokens.

/// A token with the byte offset it starts at.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize) -> Self {
        Self { kind, start }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `<...>`
    IriRef(String),
    /// `prefix:` with no local part
    PnameNs(String),
    /// `prefix:local`
    PnameLn { prefix: String, local: String },
    /// Unprefixed word: keywords (`PREFIX`, `IRI`, `a`, ...) and bare predicate names.
    Name(String),
    Integer(u64),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    At,
    Dot,
    Star,
    Plus,
    Question,
    Eof,
}

impl TokenKind {
    /// Whether this is the unprefixed word `word` (ASCII case-insensitive).
    pub fn is_keyword(&self, word: &str) -> bool {
        matches!(self, TokenKind::Name(name) if name.eq_ignore_ascii_case(word))
    }
}
