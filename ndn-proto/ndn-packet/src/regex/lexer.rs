// Copyright 2026 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lexer for component regular expressions.

use super::parser::RegexParseError;

/// The different kinds of tokens that can appear in a component regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A component matcher, e.g. `<ab.*>`. Holds the text between the angle brackets.
    Component(String),
    /// '[' (start of a component set)
    LBracket,
    /// ']' (end of a component set)
    RBracket,
    /// '^' (start anchor, or set negation right after '[')
    Caret,
    /// '$' (end anchor)
    Dollar,
    /// '|' (or)
    Or,
    /// '(' (left parenthesis)
    LParen,
    /// ')' (right parenthesis)
    RParen,
    /// '?' (optional quantifier)
    QMark,
    /// '+' (one or more quantifier)
    Plus,
    /// '*' (zero or more quantifier)
    Star,
    /// A bounded repetition, e.g. `{2,3}`.
    Repeat {
        /// Minimum number of repetitions.
        min: usize,
        /// Maximum number of repetitions, unbounded if `None`.
        max: Option<usize>,
    },
    /// End of input
    EOI,
}

/// A token with its kind and the span (start, end) in the input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span (start, end) of the token in the input string.
    pub span: (usize, usize),
}
impl Token {
    /// Returns the kind and span of the token.
    pub fn splat(&self) -> (TokenKind, (usize, usize)) {
        (self.kind.clone(), self.span)
    }

    #[inline]
    fn single_char(kind: TokenKind, i: usize) -> Self {
        Self {
            kind,
            span: (i, i + 1),
        }
    }
}

/// Produces tokens from a component regex.
pub struct RegexLexer<'a> {
    input: &'a str,
    chars: std::str::CharIndices<'a>,
}
impl<'a> RegexLexer<'a> {
    /// Create a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices(),
        }
    }

    fn next_token(&mut self) -> Option<Result<Token, RegexParseError>> {
        while let Some((idx, c)) = self.chars.next() {
            let token = match c {
                '<' => {
                    self.read_delimited(idx, '>', "component").map(|(text, span)| {
                        Token {
                            kind: TokenKind::Component(text.to_string()),
                            span,
                        }
                    })
                }
                '{' => self.read_repeat(idx),
                '[' => Ok(Token::single_char(TokenKind::LBracket, idx)),
                ']' => Ok(Token::single_char(TokenKind::RBracket, idx)),
                '^' => Ok(Token::single_char(TokenKind::Caret, idx)),
                '$' => Ok(Token::single_char(TokenKind::Dollar, idx)),
                '|' => Ok(Token::single_char(TokenKind::Or, idx)),
                '(' => Ok(Token::single_char(TokenKind::LParen, idx)),
                ')' => Ok(Token::single_char(TokenKind::RParen, idx)),
                '?' => Ok(Token::single_char(TokenKind::QMark, idx)),
                '+' => Ok(Token::single_char(TokenKind::Plus, idx)),
                '*' => Ok(Token::single_char(TokenKind::Star, idx)),
                c if c.is_whitespace() => continue,
                c => {
                    Err(RegexParseError::new(
                        (idx, idx + c.len_utf8()),
                        format!("unexpected character '{c}' outside of a component matcher")
                            .into(),
                    ))
                }
            };
            return Some(token);
        }
        None
    }

    /// Reads up to and including `close`, returning the text in between and the full span.
    fn read_delimited(
        &mut self,
        start: usize,
        close: char,
        what: &'static str,
    ) -> Result<(&'a str, (usize, usize)), RegexParseError> {
        for (idx, c) in self.chars.by_ref() {
            if c == close {
                return Ok((&self.input[start + 1..idx], (start, idx + 1)));
            }
        }
        Err(RegexParseError::new(
            (start, self.input.len()),
            format!("unterminated {what}, expected '{close}'").into(),
        ))
    }

    fn read_repeat(&mut self, start: usize) -> Result<Token, RegexParseError> {
        let (text, span) = self.read_delimited(start, '}', "repetition")?;
        let invalid = |message: String| RegexParseError::new(span, message.into());
        let number = |s: &str| {
            s.trim()
                .parse::<usize>()
                .map_err(|e| invalid(format!("invalid repetition count '{s}': {e}")))
        };

        let (min, max) = match text.split_once(',') {
            None => {
                let n = number(text)?;
                (n, Some(n))
            }
            Some((min, max)) => {
                let min = if min.trim().is_empty() { 0 } else { number(min)? };
                let max = if max.trim().is_empty() {
                    None
                } else {
                    Some(number(max)?)
                };
                (min, max)
            }
        };
        if let Some(max) = max
            && max < min
        {
            return Err(invalid(format!(
                "repetition maximum {max} is below minimum {min}"
            )));
        }

        Ok(Token {
            kind: TokenKind::Repeat { min, max },
            span,
        })
    }

    /// Tokenizes the entire input and returns a vector of tokens, ending with EOI.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, RegexParseError> {
        let mut out = Vec::new();
        while let Some(token) = self.next_token() {
            out.push(token?);
        }
        out.push(Token {
            kind: TokenKind::EOI,
            span: (self.input.len(), self.input.len()),
        });
        Ok(out)
    }
}
