use std::path::{Path, PathBuf};

use log::{info, trace};
use thiserror::Error;

use crate::token::{OPERATORS, Token, TokenKind, Value, keyword_or_reference, punctuation};

pub const ESCAPE_CHAR: char = '\\';
pub const QUOTES: [char; 2] = ['"', '\''];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
	#[error("line {line}: no token starts with '{ch}'")]
	UnknownToken { ch: char, line: usize },
	#[error("line {line}: malformed number literal '{text}'")]
	MalformedNumber { text: String, line: usize },
	#[error("line {line}: unterminated string literal")]
	UnterminatedString { line: usize },
}

impl LexError {
	pub fn line(&self) -> usize {
		match self {
			LexError::UnknownToken { line, .. }
			| LexError::MalformedNumber { line, .. }
			| LexError::UnterminatedString { line } => *line,
		}
	}
}

#[derive(Debug, Error)]
pub enum ScriptError {
	#[error("failed to read script '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("{}: {source}", path.display())]
	Lex {
		path: PathBuf,
		#[source]
		source: LexError,
	},
}

/// Tokenizes a whole script. Pure function of `source`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
	Lexer::new(source).tokenize()
}

/// Reads a `.pyscript` file and tokenizes it, attaching the path to any error.
pub fn tokenize_file(path: &Path) -> Result<Vec<Token>, ScriptError> {
	info!("START tokenizing {}", path.display());
	let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io { path: path.to_path_buf(), source })?;
	let tokens = tokenize(&source).map_err(|source| ScriptError::Lex { path: path.to_path_buf(), source })?;
	info!("END tokenizing {} ({} tokens)", path.display(), tokens.len());
	Ok(tokens)
}

pub struct Lexer {
	chars: Vec<char>,
	pos: usize,
	line: usize,
}

impl Lexer {
	pub fn new(source: &str) -> Self {
		Self { chars: source.chars().collect(), pos: 0, line: 1 }
	}

	pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
		let mut tokens = Vec::new();
		loop {
			self.skip_trivia();
			if self.is_at_end() {
				break;
			}
			let token = self.next_token()?;
			trace!("line {}: {}", self.line, token);
			tokens.push(token);
		}
		Ok(tokens)
	}

	fn next_token(&mut self) -> Result<Token, LexError> {
		let ch = self.chars[self.pos];

		if ch.is_ascii_alphabetic() || ch == '_' {
			return Ok(keyword_or_reference(self.read_ident()));
		}
		if ch.is_ascii_digit() {
			return self.read_number();
		}
		if QUOTES.contains(&ch) {
			return self.read_string();
		}
		// Longest operator wins before single-char punctuation gets a look.
		if let Some(op) = OPERATORS.iter().find(|op| self.starts_with(op)) {
			for _ in 0..op.len() {
				self.bump();
			}
			return Ok(Token::new(TokenKind::Operator, Value::Str((*op).to_string())));
		}
		if let Some(kind) = punctuation(ch) {
			self.bump();
			return Ok(Token::bare(kind));
		}
		Err(LexError::UnknownToken { ch, line: self.line })
	}

	// ─── Primitives ──────────────────────────────────────────────────────────

	fn bump(&mut self) -> Option<char> {
		let ch = *self.chars.get(self.pos)?;
		self.pos += 1;
		if ch == '\n' {
			self.line += 1;
		}
		Some(ch)
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn peek_at(&self, offset: usize) -> Option<char> {
		self.chars.get(self.pos + offset).copied()
	}

	fn is_at_end(&self) -> bool {
		self.pos >= self.chars.len()
	}

	fn starts_with(&self, text: &str) -> bool {
		text.chars().enumerate().all(|(i, c)| self.peek_at(i) == Some(c))
	}

	fn skip_trivia(&mut self) {
		while let Some(ch) = self.peek() {
			if ch.is_whitespace() {
				self.bump();
			} else if ch == '#' {
				while self.peek().is_some_and(|c| c != '\n') {
					self.bump();
				}
			} else {
				break;
			}
		}
	}

	fn eat_digits(&mut self) {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.bump();
		}
	}

	// ─── Readers ─────────────────────────────────────────────────────────────

	fn read_ident(&mut self) -> String {
		let start = self.pos;
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.bump();
		}
		self.chars[start..self.pos].iter().collect()
	}

	fn read_number(&mut self) -> Result<Token, LexError> {
		let start = self.pos;
		let mut is_float = false;
		self.eat_digits();

		// `.` only belongs to the number when a digit follows it
		if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
			self.bump();
			self.eat_digits();
			is_float = true;
		}

		if matches!(self.peek(), Some('e' | 'E')) {
			self.bump();
			if matches!(self.peek(), Some('+' | '-')) {
				self.bump();
			}
			if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
				return Err(self.malformed(start));
			}
			self.eat_digits();
			is_float = true;
		}

		let text: String = self.chars[start..self.pos].iter().collect();
		if is_float {
			let value = text.parse::<f64>().map_err(|_| self.malformed(start))?;
			Ok(Token::new(TokenKind::FloatLit, Value::Float(value)))
		} else {
			let value = text.parse::<i64>().map_err(|_| self.malformed(start))?;
			Ok(Token::new(TokenKind::IntLit, Value::Int(value)))
		}
	}

	fn malformed(&self, start: usize) -> LexError {
		LexError::MalformedNumber { text: self.chars[start..self.pos].iter().collect(), line: self.line }
	}

	fn read_string(&mut self) -> Result<Token, LexError> {
		let start_line = self.line;
		let Some(quote) = self.bump() else {
			return Err(LexError::UnterminatedString { line: start_line });
		};
		let mut text = String::new();
		loop {
			match self.bump() {
				None => return Err(LexError::UnterminatedString { line: start_line }),
				Some(ESCAPE_CHAR) => match self.peek() {
					// Consuming `\\` as a pair keeps the odd/even backslash rule.
					Some(next) if next == quote || next == ESCAPE_CHAR => {
						self.bump();
						text.push(next);
					}
					_ => text.push(ESCAPE_CHAR),
				},
				Some(ch) if ch == quote => break,
				Some(ch) => text.push(ch),
			}
		}
		Ok(Token::new(TokenKind::StringLit, Value::Str(text)))
	}
}
