/// S-expression lexer and parser for the surface syntax
///
/// The lexer splits input into parentheses, string literals, numeric
/// literals, bare words and the `!` query marker. The parser pulls tokens
/// lazily and yields one top-level `Form` at a time, so a runner can act on
/// each form before the rest of the input is even tokenized.
use std::fmt;

use crate::error::MettaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Word(String),
    String(String),
    Integer(i64),
    Float(f64),
    Exclaim,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Word(s) => write!(f, "{}", s),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Integer(i) => write!(f, "{}", i),
            Token::Float(fl) => write!(f, "{}", fl),
            Token::Exclaim => write!(f, "!"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with the position of its first character (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Hand-written lexer
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> MettaError {
        MettaError::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == ';' {
                while let Some(ch) = self.advance() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn is_delimiter(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ';')
    }

    fn read_string(&mut self, line: usize, column: usize) -> Result<String, MettaError> {
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.advance() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some(c) => result.push(c),
                    None => break,
                },
                c => result.push(c),
            }
        }
        Err(self.error(line, column, "unclosed string literal"))
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if Self::is_delimiter(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    /// Integers and floats are recognized here rather than through the
    /// token table so that out-of-range literals are reported as parse errors.
    fn classify_word(&self, word: String, line: usize, column: usize) -> Result<Token, MettaError> {
        let digits = word.strip_prefix('-').unwrap_or(&word);
        let numeric = digits.chars().next().map_or(false, |c| c.is_ascii_digit());
        if !numeric {
            return Ok(Token::Word(word));
        }
        if digits.chars().all(|c| c.is_ascii_digit()) {
            return word
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| self.error(line, column, format!("integer literal out of range: {}", word)));
        }
        let looks_float = digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
        match word.parse::<f64>() {
            Ok(x) if looks_float => Ok(Token::Float(x)),
            _ => Ok(Token::Word(word)),
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned, MettaError> {
        self.skip_whitespace_and_comments();
        let (line, column) = (self.line, self.column);
        let spanned = |token| Spanned { token, line, column };

        match self.current() {
            None => Ok(spanned(Token::Eof)),
            Some('(') => {
                self.advance();
                Ok(spanned(Token::LParen))
            }
            Some(')') => {
                self.advance();
                Ok(spanned(Token::RParen))
            }
            Some('"') => Ok(spanned(Token::String(self.read_string(line, column)?))),
            // `!=` is an ordinary word; any other leading `!` marks a query
            Some('!') if self.peek(1) != Some('=') => {
                self.advance();
                Ok(spanned(Token::Exclaim))
            }
            Some(_) => {
                let word = self.read_word();
                Ok(spanned(self.classify_word(word, line, column)?))
            }
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, MettaError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }
}

/// Untyped syntax tree produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    /// Bare word: symbol, variable or registered token
    Word(String),
    /// String literal
    String(String),
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// Parenthesized list, possibly empty
    List(Vec<SExpr>),
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SExpr::Word(s) => write!(f, "{}", s),
            SExpr::String(s) => write!(f, "{:?}", s),
            SExpr::Integer(i) => write!(f, "{}", i),
            SExpr::Float(fl) => write!(f, "{:?}", fl),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// One top-level form: `!FORM` is a query, anything else is added to the space.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub is_query: bool,
    pub sexpr: SExpr,
}

/// Incremental parser over a `Lexer`.
pub struct Parser {
    lexer: Lexer,
    /// Lists opened and not yet closed in the form being read
    open: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            open: 0,
        }
    }

    /// Next top-level form, or `None` at end of input.
    ///
    /// A malformed form yields its error and is skipped up to the `)`
    /// closing its outermost list, so the following call starts at the
    /// next form. An unclosed list swallows the rest of the input.
    pub fn next_form(&mut self) -> Result<Option<Form>, MettaError> {
        self.open = 0;
        let result = self.read_form();
        if result.is_err() {
            self.skip_open_lists();
        }
        result
    }

    fn skip_open_lists(&mut self) {
        while self.open > 0 {
            match self.lexer.next_token() {
                Ok(Spanned { token: Token::LParen, .. }) => self.open += 1,
                Ok(Spanned { token: Token::RParen, .. }) => self.open -= 1,
                Ok(Spanned { token: Token::Eof, .. }) => break,
                // the lexer has moved past the bad token
                _ => {}
            }
        }
        self.open = 0;
    }

    fn read_form(&mut self) -> Result<Option<Form>, MettaError> {
        let first = self.lexer.next_token()?;
        match first.token {
            Token::Eof => Ok(None),
            Token::Exclaim => {
                let next = self.lexer.next_token()?;
                if next.token == Token::Eof {
                    return Err(MettaError::Parse {
                        line: first.line,
                        column: first.column,
                        message: "'!' must be followed by a form".to_string(),
                    });
                }
                let sexpr = self.read_sexpr(next)?;
                Ok(Some(Form {
                    is_query: true,
                    sexpr,
                }))
            }
            _ => {
                let sexpr = self.read_sexpr(first)?;
                Ok(Some(Form {
                    is_query: false,
                    sexpr,
                }))
            }
        }
    }

    fn read_sexpr(&mut self, start: Spanned) -> Result<SExpr, MettaError> {
        match start.token {
            Token::Word(w) => Ok(SExpr::Word(w)),
            Token::String(s) => Ok(SExpr::String(s)),
            Token::Integer(i) => Ok(SExpr::Integer(i)),
            Token::Float(x) => Ok(SExpr::Float(x)),
            Token::LParen => {
                self.open += 1;
                let mut items = Vec::new();
                loop {
                    let next = self.lexer.next_token()?;
                    match next.token {
                        Token::RParen => {
                            self.open -= 1;
                            return Ok(SExpr::List(items));
                        }
                        Token::Eof => {
                            return Err(MettaError::Parse {
                                line: start.line,
                                column: start.column,
                                message: "unclosed '('".to_string(),
                            })
                        }
                        _ => items.push(self.read_sexpr(next)?),
                    }
                }
            }
            Token::RParen => Err(MettaError::Parse {
                line: start.line,
                column: start.column,
                message: "unexpected ')'".to_string(),
            }),
            Token::Exclaim => Err(MettaError::Parse {
                line: start.line,
                column: start.column,
                message: "'!' is only allowed before a top-level form".to_string(),
            }),
            Token::Eof => Err(MettaError::Parse {
                line: start.line,
                column: start.column,
                message: "unexpected end of input".to_string(),
            }),
        }
    }

    /// Parse the whole input.
    pub fn parse_all(&mut self) -> Result<Vec<Form>, MettaError> {
        let mut forms = Vec::new();
        while let Some(form) = self.next_form()? {
            forms.push(form);
        }
        Ok(forms)
    }
}
