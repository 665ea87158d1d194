use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::token::{Category, Token};

/// Characters that may form an operator run.
const OPERATORS: &str = "+-*<>&.@/:=~|$!#%^_[]{}\"?";

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec!(),
            line: 1,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    ///
    /// The vector still contains the whitespace, newline and comment tokens
    /// (tagged [`Category::Delete`]); the screener drops them. The first
    /// token is flagged `first` and the last non-newline emission is
    /// flagged `last`.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, ScanError> {
        while let Some(&c) = self.source.peek() {
            self.scan_token(c)?;
        }

        // A trailing newline never carries the terminal flag.
        if matches!(self.tokens.last(), Some(token) if token.lexeme == "\n") {
            self.tokens.pop();
        }

        if let Some(first) = self.tokens.first_mut() {
            first.first = true;
        }
        if let Some(last) = self.tokens.last_mut() {
            last.last = true;
        }

        Ok(self.tokens.clone())
    }

    /// Returns the next character.
    fn advance(&mut self) -> char {
        match self.source.next() {
            Some(char) => char,
            None => panic!("tried to advance past end of the file."),
        }
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, category: Category, lexeme: String) {
        self.tokens.push(Token::new(lexeme, category, self.line));
    }

    /// Scans the next token.
    fn scan_token(&mut self, c: char) -> Result<(), ScanError> {
        match c {
            c if c.is_ascii_alphabetic() => self.identifier(),
            c if c.is_ascii_digit() => self.number(),
            '\'' => self.string()?,
            '(' | ')' | ';' | ',' => self.punctuation(),
            ' ' | '\t' => self.whitespace(),
            '\n' => self.newline(),
            c if OPERATORS.contains(c) => self.comment_or_operator(),
            _ => {
                return Err(ScanError::new(
                    self.line,
                    format!("unknown character '{c}'"),
                ));
            },
        }

        Ok(())
    }

    /// Handles an identifier.
    fn identifier(&mut self) {
        let mut value = String::new();

        while matches!(self.source.peek(), Some(c) if c.is_ascii_alphanumeric() || *c == '_') {
            value.push(self.advance());
        }

        self.add_token(Category::Identifier, value);
    }

    /// Handles an integer literal.
    ///
    /// A digit run immediately followed by letters is consumed whole and
    /// tagged invalid, so `123abc` surfaces as one bad token instead of
    /// two surprising good ones.
    fn number(&mut self) {
        let mut value = String::new();

        while matches!(self.source.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            value.push(self.advance());
        }

        let category = match value.chars().all(|c| c.is_ascii_digit()) {
            true => Category::Integer,
            false => Category::Invalid,
        };

        self.add_token(category, value);
    }

    /// Handles a string literal.
    ///
    /// Strings are single-quoted and may span newlines; the lexeme keeps
    /// the surrounding quotes and the token records the line the string
    /// ends on.
    fn string(&mut self) -> Result<(), ScanError> {
        let mut value = String::new();
        value.push(self.advance()); // Move past the opening quote.

        let mut terminated = false;
        while let Some(&c) = self.source.peek() {
            if c == '\n' {
                self.line += 1;
            }

            value.push(self.advance());

            if c == '\'' {
                terminated = true;
                break;
            }
        }

        if !terminated {
            return Err(ScanError::new(self.line, "unterminated string literal"));
        }

        self.add_token(Category::Str, value);
        Ok(())
    }

    /// Handles a single punctuation character.
    fn punctuation(&mut self) {
        let c = self.advance();
        self.add_token(Category::Punctuation, c.to_string());
    }

    /// Handles a run of spaces and tabs.
    fn whitespace(&mut self) {
        let mut value = String::new();

        while matches!(self.source.peek(), Some(&c) if c == ' ' || c == '\t') {
            value.push(self.advance());
        }

        self.add_token(Category::Delete, value);
    }

    /// Handles a single newline character.
    fn newline(&mut self) {
        self.advance();
        self.add_token(Category::Delete, String::from("\n"));
        self.line += 1;
    }

    /// Decides between a comment and an operator run.
    fn comment_or_operator(&mut self) {
        if matches!(self.source.peek(), Some(&'/')) && matches!(self.source.peek_nth(1), Some(&'/')) {
            self.comment();
        } else {
            self.operator();
        }
    }

    /// Handles a comment running to the end of the line.
    fn comment(&mut self) {
        let mut value = String::new();
        value.push(self.advance());
        value.push(self.advance());

        while matches!(self.source.peek(), Some(&c) if c != '\n') {
            value.push(self.advance());
        }

        self.add_token(Category::Delete, value);
    }

    /// Handles a maximal run of operator characters.
    ///
    /// The run breaks before `//` so comments are not absorbed.
    fn operator(&mut self) {
        let mut value = String::new();

        while let Some(&c) = self.source.peek() {
            if !OPERATORS.contains(c) {
                break;
            }
            if c == '/' && matches!(self.source.peek_nth(1), Some(&'/')) {
                break;
            }
            value.push(self.advance());
        }

        self.add_token(Category::Operator, value);
    }
}
