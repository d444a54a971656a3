use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display, rc::Rc};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for keyword in [
            "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
            "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
            "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass",
            "raise", "return", "try", "while", "with", "yield",
        ] {
            set.insert(keyword);
        }
        set
    };
    pub static ref STRING_PREFIXES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for prefix in ["b", "r", "rb", "br", "u", "f"] {
            set.insert(prefix);
        }
        set
    };
}

/// Multi-character operators, longest first so a prefix scan picks the longest match.
pub const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "+=", "-=", "*=", "/=", "%=", "@=", "&=", "|=", "^=",
    "**", "//", "<<", ">>", "==", "!=", ">=", "<=", "->",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Name,
    Number,
    String,
    Op,
    /// End of a logical line.
    Newline,
    /// Line break that does not end a logical line (blank line, comment line, inside brackets).
    Nl,
    Indent,
    Dedent,
    Comment,
    EndMarker,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Name => "NAME",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Op => "OP",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Nl => "NL",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Comment => "COMMENT",
            TokenKind::EndMarker => "ENDMARKER",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 1-based line the token starts on.
    pub line: u32,
    /// The physical line the token was scanned from.
    pub raw_line: Rc<str>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {:?}", self.line, self.kind, self.value)
    }
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Name && RESERVED_LOOKUP.contains(self.value.as_str())
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Name | TokenKind::Number | TokenKind::String | TokenKind::Op => {
                format!("{:?}", self.value)
            }
            kind => kind.to_string(),
        }
    }
}
