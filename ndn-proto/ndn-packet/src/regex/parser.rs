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

//! Parser for component regular expressions.

// Pratt parser.
// 1. Parse an atom: component matcher, set or parenthesized group.
// 2. Apply postfix quantifiers greedily.
// 3. Parse infixes. Concatenation has no operator token, it is recognized by the next token
//    starting an atom.
//
// - OR     = 10 (lowest)
// - CONCAT = 20

use std::borrow::Cow;

use super::{
    ComponentMatcher, RegexExpression,
    lexer::{Token, TokenKind},
};

/// Precedence for top level objects without left/right hand side (lowest power).
const NO_BIND_POWER: u8 = 0;
/// Precedence for alternation.
const OR_BIND_POWER: u8 = 10;
/// Precedence for concatenation.
const CONCAT_BIND_POWER: u8 = 20;

/// Error returned when a component regex cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}..{}", span.0, span.1)]
pub struct RegexParseError {
    /// The span (start, end) in the input string where the error occurred.
    pub span: (usize, usize),
    /// A human-readable error message.
    pub message: Cow<'static, str>,
}
impl RegexParseError {
    /// Creates a new error with the given span and message.
    pub fn new(span: (usize, usize), message: Cow<'static, str>) -> Self {
        Self { span, message }
    }

    /// Pretty formatting of the error with context from the input string.
    ///
    /// `input` must be the original parser input string.
    pub fn report(&self, input: &str) -> String {
        let (start, end) = self.span;

        let start = start.min(input.len());
        let end = end.min(input.len());

        // Context window around the error
        let context = 20;
        let slice_start = floor_char_boundary(input, start.saturating_sub(context));
        let slice_end = ceil_char_boundary(input, (end + context).min(input.len()));
        let snippet = &input[slice_start..slice_end];

        let marker_offset = input[slice_start..start].chars().count();
        let marker_len = input[start..end].chars().count().max(1);
        let marker = format!("{}{}", " ".repeat(marker_offset), "^".repeat(marker_len));

        format!("{snippet}\n{marker}\n{}", self.message)
    }
}

fn floor_char_boundary(input: &str, mut index: usize) -> usize {
    while !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(input: &str, mut index: usize) -> usize {
    while !input.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Result of parsing a whole pattern.
#[derive(Debug)]
pub(super) struct ParsedRegex {
    pub anchored_start: bool,
    pub anchored_end: bool,
    pub expression: RegexExpression,
}

/// The parser for component regular expressions.
pub struct RegexParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}
impl<'a> RegexParser<'a> {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn consume(&mut self) -> Option<(TokenKind, (usize, usize))> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token.splat())
    }

    fn end_span(&self) -> (usize, usize) {
        self.tokens
            .last()
            .map(|t| (t.span.1, t.span.1))
            .unwrap_or((0, 0))
    }

    fn starts_atom(kind: Option<&TokenKind>) -> bool {
        matches!(
            kind,
            Some(TokenKind::Component(_) | TokenKind::LBracket | TokenKind::LParen)
        )
    }

    fn parse_expr(&mut self, left_binding_power: u8) -> Result<RegexExpression, RegexParseError> {
        let mut expr = match self.consume() {
            Some((TokenKind::Component(pattern), span)) => {
                RegexExpression::Component(ComponentMatcher::compile(&pattern, span)?)
            }
            Some((TokenKind::LBracket, span)) => self.parse_set(span)?,
            Some((TokenKind::LParen, span_l)) => {
                let nested_expr = self.parse_expr(NO_BIND_POWER)?;
                match self.consume() {
                    Some((TokenKind::RParen, _)) => nested_expr,
                    Some((TokenKind::EOI, _)) | None => {
                        return Err(RegexParseError::new(
                            span_l,
                            "unclosed '(', unexpected end of pattern".into(),
                        ));
                    }
                    Some((_, span)) => {
                        return Err(RegexParseError::new(span, "expected ')'".into()));
                    }
                }
            }
            Some((TokenKind::EOI, span)) => {
                return Err(RegexParseError::new(
                    span,
                    "unexpected end of pattern, expected '<', '[' or '('".into(),
                ));
            }
            Some((kind, span)) => {
                return Err(RegexParseError::new(
                    span,
                    format!("unexpected token: {kind:?}, expected '<', '[' or '('").into(),
                ));
            }
            None => {
                return Err(RegexParseError::new(
                    self.end_span(),
                    "unexpected end of pattern, expected '<', '[' or '('".into(),
                ));
            }
        };

        loop {
            let repeat = match self.peek_kind() {
                Some(TokenKind::QMark) => Some((0, Some(1))),
                Some(TokenKind::Plus) => Some((1, None)),
                Some(TokenKind::Star) => Some((0, None)),
                Some(TokenKind::Repeat { min, max }) => Some((*min, *max)),
                _ => None,
            };
            if let Some((min, max)) = repeat {
                self.consume();
                expr = RegexExpression::Repeat {
                    inner: Box::new(expr),
                    min,
                    max,
                };
                continue;
            }

            let (op_binding_power, consumes_token) = match self.peek_kind() {
                Some(TokenKind::Or) => (OR_BIND_POWER, true),
                kind if Self::starts_atom(kind) => (CONCAT_BIND_POWER, false),
                _ => break,
            };
            if left_binding_power > op_binding_power {
                break;
            }
            if consumes_token {
                self.consume();
            }

            // Both operators group left to right.
            let right_expr = self.parse_expr(op_binding_power + 1)?;
            expr = if op_binding_power == OR_BIND_POWER {
                RegexExpression::Or(Box::new(expr), Box::new(right_expr))
            } else {
                expr.then(right_expr)
            };
        }

        Ok(expr)
    }

    /// Parses the remainder of a set after its opening bracket.
    fn parse_set(&mut self, open: (usize, usize)) -> Result<RegexExpression, RegexParseError> {
        let negated = if self.peek_kind() == Some(&TokenKind::Caret) {
            self.consume();
            true
        } else {
            false
        };

        let mut matchers = Vec::new();
        loop {
            match self.consume() {
                Some((TokenKind::Component(pattern), span)) => {
                    matchers.push(ComponentMatcher::compile(&pattern, span)?);
                }
                Some((TokenKind::RBracket, span)) => {
                    if matchers.is_empty() {
                        return Err(RegexParseError::new(
                            (open.0, span.1),
                            "empty component set".into(),
                        ));
                    }
                    return Ok(RegexExpression::Set { matchers, negated });
                }
                Some((TokenKind::EOI, _)) | None => {
                    return Err(RegexParseError::new(
                        open,
                        "unclosed '[', unexpected end of pattern".into(),
                    ));
                }
                Some((kind, span)) => {
                    return Err(RegexParseError::new(
                        span,
                        format!("unexpected token in set: {kind:?}, expected '<' or ']'").into(),
                    ));
                }
            }
        }
    }

    /// Parses a whole pattern: optional `^`, an expression, optional `$`.
    pub(super) fn parse(&mut self) -> Result<ParsedRegex, RegexParseError> {
        let anchored_start = self.peek_kind() == Some(&TokenKind::Caret);
        if anchored_start {
            self.consume();
        }

        let expression = if Self::starts_atom(self.peek_kind()) {
            self.parse_expr(NO_BIND_POWER)?
        } else {
            RegexExpression::Sequence(Vec::new())
        };

        let anchored_end = self.peek_kind() == Some(&TokenKind::Dollar);
        if anchored_end {
            self.consume();
        }

        match self.tokens.get(self.pos) {
            Some(token) if token.kind == TokenKind::EOI && self.pos == self.tokens.len() - 1 => {
                Ok(ParsedRegex {
                    anchored_start,
                    anchored_end,
                    expression,
                })
            }
            Some(token) => {
                Err(RegexParseError::new(
                    token.span,
                    format!("unexpected token: {:?}", token.kind).into(),
                ))
            }
            None => Err(RegexParseError::new(self.end_span(), "missing end of input".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::lexer::RegexLexer;

    fn parse(input: &str) -> Result<ParsedRegex, RegexParseError> {
        let tokens = RegexLexer::new(input).tokenize()?;
        RegexParser::new(&tokens).parse()
    }

    #[test]
    fn should_bind_concatenation_tighter_than_or() {
        let parsed = parse("<a><b>|<c>").unwrap();
        match parsed.expression {
            RegexExpression::Or(lhs, rhs) => {
                match *lhs {
                    RegexExpression::Sequence(ref items) if items.len() == 2 => {}
                    ref other => panic!("Expected Sequence of two on LHS, got: {other:?}"),
                }
                match *rhs {
                    RegexExpression::Component(_) => {}
                    ref other => panic!("Expected Component on RHS, got: {other:?}"),
                }
            }
            other => panic!("Expected Or at root, got: {other:?}"),
        }
    }

    #[test]
    fn should_flatten_sequences() {
        let parsed = parse("<a><b><c>").unwrap();
        match parsed.expression {
            RegexExpression::Sequence(items) => assert_eq!(items.len(), 3),
            other => panic!("Expected Sequence, got: {other:?}"),
        }
    }

    #[test]
    fn should_apply_quantifiers_to_groups() {
        let parsed = parse("(<a>|<b>){2,3}").unwrap();
        match parsed.expression {
            RegexExpression::Repeat { inner, min, max } => {
                assert_eq!((min, max), (2, Some(3)));
                match *inner {
                    RegexExpression::Or(..) => {}
                    ref other => panic!("Expected Or inside Repeat, got: {other:?}"),
                }
            }
            other => panic!("Expected Repeat, got: {other:?}"),
        }
    }

    #[test]
    fn should_parse_anchors_and_negated_sets() {
        let parsed = parse("^[^<a><b>]$").unwrap();
        assert!(parsed.anchored_start);
        assert!(parsed.anchored_end);
        match parsed.expression {
            RegexExpression::Set { matchers, negated } => {
                assert!(negated);
                assert_eq!(matchers.len(), 2);
            }
            other => panic!("Expected Set, got: {other:?}"),
        }
    }

    #[test]
    fn should_accept_empty_pattern() {
        let parsed = parse("^$").unwrap();
        assert!(matches!(parsed.expression, RegexExpression::Sequence(ref v) if v.is_empty()));
    }

    mod error_tests {
        use super::*;

        #[test]
        fn should_error_on_unclosed_group() {
            let err = parse("(<a>").unwrap_err();
            assert_eq!(err.span, (0, 1));
            assert!(err.message.contains("unclosed '('"));
        }

        #[test]
        fn should_error_on_empty_set() {
            let err = parse("<a>[]").unwrap_err();
            assert_eq!(err.span, (3, 5));
        }

        #[test]
        fn should_error_on_dangling_or() {
            let err = parse("<a>|").unwrap_err();
            assert!(err.message.contains("unexpected end"), "{err:?}");
        }

        #[test]
        fn should_error_on_misplaced_anchor() {
            let err = parse("<a>$<b>").unwrap_err();
            assert_eq!(err.span, (4, 7));
        }

        #[test]
        fn should_error_on_invalid_component_regex() {
            let err = parse("<a><(>").unwrap_err();
            assert_eq!(err.span, (3, 6));
            assert!(err.message.contains("invalid component pattern"));
        }

        #[test]
        fn should_report_with_marker() {
            let input = "<a>[]";
            let err = parse(input).unwrap_err();
            assert_eq!(err.report(input), "<a>[]\n   ^^\nempty component set");
        }
    }
}
