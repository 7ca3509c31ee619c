use std::fmt;

/// Words that lex as `Keyword` instead of `Reference`.
pub const KEYWORDS: &[&str] = &["const", "var", "return", "exit"];

/// Operators ordered longest first, so `==` is tried before `=`-prefixed
/// punctuation and `**` before `*`.
pub const OPERATORS: &[&str] = &[
	"**", "//", "==", "!=", "<=", ">=", // two-char
	"+", "-", "*", "/", "%", "<", ">",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// Reserved for `pass`; never produced by the lexer.
	Nop,
	Keyword,
	Reference,
	Semicolon,
	Indent,
	Deindent,
	Assign,
	OpenParen,
	CloseParen,
	Comma,
	Operator,
	StringLit,
	IntLit,
	FloatLit,
}

impl TokenKind {
	pub fn name(self) -> &'static str {
		match self {
			TokenKind::Nop => "NOP",
			TokenKind::Keyword => "KEYWORD",
			TokenKind::Reference => "REFERENCE",
			TokenKind::Semicolon => "SEMICOLON",
			TokenKind::Indent => "INDENT",
			TokenKind::Deindent => "DEINDENT",
			TokenKind::Assign => "ASSIGN",
			TokenKind::OpenParen => "OPEN_PAREN",
			TokenKind::CloseParen => "CLOSE_PAREN",
			TokenKind::Comma => "COMMA",
			TokenKind::Operator => "OPERATOR",
			TokenKind::StringLit => "STRING_LIT",
			TokenKind::IntLit => "INT_LIT",
			TokenKind::FloatLit => "FLOAT_LIT",
		}
	}
}

impl fmt::Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Maps a single punctuation character to its token kind.
pub fn punctuation(ch: char) -> Option<TokenKind> {
	match ch {
		'{' => Some(TokenKind::Indent),
		'}' => Some(TokenKind::Deindent),
		'=' => Some(TokenKind::Assign),
		'(' => Some(TokenKind::OpenParen),
		')' => Some(TokenKind::CloseParen),
		';' => Some(TokenKind::Semicolon),
		',' => Some(TokenKind::Comma),
		_ => None,
	}
}

pub fn keyword_or_reference(text: String) -> Token {
	let kind = if KEYWORDS.contains(&text.as_str()) { TokenKind::Keyword } else { TokenKind::Reference };
	Token::new(kind, Value::Ident(text))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	None,
	Str(String),
	Int(i64),
	Float(f64),
	Ident(String),
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => f.write_str("None"),
			Value::Str(s) => write!(f, "{:?}", s),
			Value::Int(n) => write!(f, "{}", n),
			Value::Float(x) => write!(f, "{:?}", x),
			Value::Ident(s) => f.write_str(s),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub value: Value,
}

impl Token {
	pub fn new(kind: TokenKind, value: Value) -> Self {
		Self { kind, value }
	}

	pub fn bare(kind: TokenKind) -> Self {
		Self { kind, value: Value::None }
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value {
			Value::None => write!(f, "Token({})", self.kind),
			_ => write!(f, "Token({}, {})", self.kind, self.value),
		}
	}
}
