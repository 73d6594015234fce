use std::fmt;

use distcalc_core::Operation;

/// A lexical unit of an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Raw numeral text. Parsed later, so malformed numerals survive tokenizing.
    Number(String),
    Operator(Operation),
    LeftParen,
    RightParen,
}

impl Token {
    pub fn as_operator(&self) -> Option<Operation> {
        match self {
            Token::Operator(op) => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => f.write_str(text),
            Token::Operator(op) => f.write_str(op.symbol()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Split `source` into numerals, operators and parentheses.
///
/// Any run of characters that are not whitespace, an operator or a
/// parenthesis becomes one numeral token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut numeral = String::new();

    let flush = |numeral: &mut String, tokens: &mut Vec<Token>| {
        if !numeral.is_empty() {
            tokens.push(Token::Number(std::mem::take(numeral)));
        }
    };

    for ch in source.chars() {
        let token = match ch {
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            c if c.is_whitespace() => None,
            c => match Operation::from_symbol(c.encode_utf8(&mut [0; 4])) {
                Some(op) => Some(Token::Operator(op)),
                None => {
                    numeral.push(c);
                    continue;
                }
            },
        };
        flush(&mut numeral, &mut tokens);
        if let Some(token) = token {
            tokens.push(token);
        }
    }
    flush(&mut numeral, &mut tokens);

    tokens
}
