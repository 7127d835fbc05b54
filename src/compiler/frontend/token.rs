use crate::compiler::source::Span;
use std::{fmt, str::FromStr};

/// Punctuation that always forms a one-character `Symbol` token.
pub const SYMBOLS: &str = "{}()[].,;+-*/&|<>=~";

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    /// Line the token starts on, one-based.
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new<L: Into<String>>(lexeme: L, kind: TokenKind, line: usize, span: Span) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            line,
            span,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            TokenKind::Symbol => self.lexeme.chars().next(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    #[inline]
    pub fn is_symbol(&self, symbol: char) -> bool {
        self.symbol() == Some(symbol)
    }

    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Built-in type keyword or a class name.
    pub fn is_type(&self) -> bool {
        match self.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword(keyword) => keyword.is_primitive_type(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenKind {
    /// Tag used for the token in the parse-tree trace.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::Identifier => "identifier",
        }
    }
}

/// Identifiers in the set of reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        use Keyword as K;
        match self {
            K::Class => "class",
            K::Constructor => "constructor",
            K::Function => "function",
            K::Method => "method",
            K::Field => "field",
            K::Static => "static",
            K::Var => "var",
            K::Int => "int",
            K::Char => "char",
            K::Boolean => "boolean",
            K::Void => "void",
            K::True => "true",
            K::False => "false",
            K::Null => "null",
            K::This => "this",
            K::Let => "let",
            K::Do => "do",
            K::If => "if",
            K::Else => "else",
            K::While => "while",
            K::Return => "return",
        }
    }

    pub fn is_primitive_type(&self) -> bool {
        matches!(self, Keyword::Int | Keyword::Char | Keyword::Boolean)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = ();

    #[rustfmt::skip]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Keyword as K;
        match s {
            "class"       => Ok(K::Class),
            "constructor" => Ok(K::Constructor),
            "function"    => Ok(K::Function),
            "method"      => Ok(K::Method),
            "field"       => Ok(K::Field),
            "static"      => Ok(K::Static),
            "var"         => Ok(K::Var),
            "int"         => Ok(K::Int),
            "char"        => Ok(K::Char),
            "boolean"     => Ok(K::Boolean),
            "void"        => Ok(K::Void),
            "true"        => Ok(K::True),
            "false"       => Ok(K::False),
            "null"        => Ok(K::Null),
            "this"        => Ok(K::This),
            "let"         => Ok(K::Let),
            "do"          => Ok(K::Do),
            "if"          => Ok(K::If),
            "else"        => Ok(K::Else),
            "while"       => Ok(K::While),
            "return"      => Ok(K::Return),
            _             => Err(()),
        }
    }
}
