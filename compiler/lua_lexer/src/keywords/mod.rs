//! Reserved-word resolution.
//!
//! The raw scanner emits every identifier as `RawTag::Name`; the cooker asks
//! [`lookup`] whether the full identifier text is a reserved word. Matching is
//! exact and case-sensitive, so `forever` and `End` stay names.
//!
//! The lookup uses the identifier's length as a first-pass filter (reserved
//! words are 2-8 bytes), then matches against the words of that length.

use std::fmt;

use lua_lexer_core::Dialect;

/// A Lua reserved word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    /// Reserved from Lua 5.2 on.
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,
}

impl Keyword {
    /// Every keyword, in alphabetical order.
    pub const ALL: [Keyword; 22] = [
        Keyword::And,
        Keyword::Break,
        Keyword::Do,
        Keyword::Else,
        Keyword::Elseif,
        Keyword::End,
        Keyword::False,
        Keyword::For,
        Keyword::Function,
        Keyword::Goto,
        Keyword::If,
        Keyword::In,
        Keyword::Local,
        Keyword::Nil,
        Keyword::Not,
        Keyword::Or,
        Keyword::Repeat,
        Keyword::Return,
        Keyword::Then,
        Keyword::True,
        Keyword::Until,
        Keyword::While,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Break => "break",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Elseif => "elseif",
            Keyword::End => "end",
            Keyword::False => "false",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::Goto => "goto",
            Keyword::If => "if",
            Keyword::In => "in",
            Keyword::Local => "local",
            Keyword::Nil => "nil",
            Keyword::Not => "not",
            Keyword::Or => "or",
            Keyword::Repeat => "repeat",
            Keyword::Return => "return",
            Keyword::Then => "then",
            Keyword::True => "true",
            Keyword::Until => "until",
            Keyword::While => "while",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up a reserved word by its exact text.
///
/// Returns `None` for ordinary names. `goto` is only reserved when the dialect
/// has labels; under Lua 5.1 it is a plain name.
#[inline]
pub fn lookup(text: &str, dialect: Dialect) -> Option<Keyword> {
    let bytes = text.as_bytes();
    if !(2..=8).contains(&bytes.len()) || !bytes[0].is_ascii_lowercase() {
        return None;
    }

    let keyword = match bytes.len() {
        2 => match text {
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "in" => Keyword::In,
            "or" => Keyword::Or,
            _ => return None,
        },
        3 => match text {
            "and" => Keyword::And,
            "end" => Keyword::End,
            "for" => Keyword::For,
            "nil" => Keyword::Nil,
            "not" => Keyword::Not,
            _ => return None,
        },
        4 => match text {
            "else" => Keyword::Else,
            "goto" if dialect.has_goto() => Keyword::Goto,
            "then" => Keyword::Then,
            "true" => Keyword::True,
            _ => return None,
        },
        5 => match text {
            "break" => Keyword::Break,
            "false" => Keyword::False,
            "local" => Keyword::Local,
            "until" => Keyword::Until,
            "while" => Keyword::While,
            _ => return None,
        },
        6 => match text {
            "elseif" => Keyword::Elseif,
            "repeat" => Keyword::Repeat,
            "return" => Keyword::Return,
            _ => return None,
        },
        8 => match text {
            "function" => Keyword::Function,
            _ => return None,
        },
        _ => return None,
    };
    Some(keyword)
}
