//! Syntax kinds for rellang.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `RelLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    /// `:=` in definitions. Longest match wins over `Colon`.
    #[token(":=")]
    DefEquals,

    #[token(":")]
    Colon,

    #[token("->")]
    Arrow,

    #[token(";")]
    Semicolon,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("set")]
    KwSet,

    #[token("rel")]
    KwRel,

    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    /// Statement terminator; not trivia.
    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    SetDef,
    RelDef,
    ExprStmt,
    /// `expr : A -> B` around a composite expression
    Ascription,
    Composition,
    RelCoproduct,
    RelProduct,
    /// `R : A -> B`
    AtomicRel,
    /// Bare `R`
    RelRef,
    RelParen,
    DomCod,
    SetCoproduct,
    SetProduct,
    SetRef,
    SetParen,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelLang {}

impl Language for RelLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<RelLang>;
pub type SyntaxToken = rowan::SyntaxToken<RelLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..(__LAST as u16).min(64) {
            if self.0 & (1 << i) != 0 {
                // SAFETY: i < __LAST, and SyntaxKind is repr(u16)
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of both relation and set expressions.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[ParenOpen, Id]);

    /// Tokens that may start a statement.
    pub const STMT_FIRST: TokenSet = TokenSet::new(&[KwSet, KwRel, ParenOpen, Id]);

    /// Tokens allowed inside a parenthesized set expression.
    pub const SET_GROUP: TokenSet =
        TokenSet::new(&[ParenOpen, ParenClose, Id, Star, Plus, Whitespace]);

    /// Where a broken statement stops being skipped.
    pub const STMT_RECOVERY: TokenSet = TokenSet::new(&[Newline]);
}
