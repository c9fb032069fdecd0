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

//! Regular expressions over name components, as used by interest filters.

use std::{fmt, str::FromStr};

pub use parser::RegexParseError;

use self::{lexer::RegexLexer, parser::RegexParser};
use crate::name::Component;

mod lexer;
mod parser;

/// Regular expression over name components.
///
/// A pattern is a series of expressions that must match consecutive components in order.
/// Supported syntax:
/// - `<re>`: One component whose URI form fully matches the regular expression `re`. `<>`
///   matches any component.
/// - `[<a><b>]`: One component matching any of the listed matchers.
/// - `[^<a><b>]`: One component matching none of the listed matchers.
/// - `(` and `)` group expressions.
/// - `|` (OR): Either the left or right expression must match. Binds weaker than concatenation.
/// - `?`, `+`, `*`: The preceding expression may appear zero or one, one or more, or zero or
///   more times.
/// - `{n}`, `{n,}`, `{,m}`, `{n,m}`: The preceding expression appears a bounded number of times.
/// - `^` and `$` anchor the pattern at the first and after the last component. Without them the
///   pattern may match anywhere.
///
/// Examples:
///
/// ```
/// use ndn_packet::{name::Name, regex::NdnRegex};
///
/// let name = Name::from_uri("/app/video/frame1").unwrap();
///
/// // Anywhere in the name.
/// assert!(NdnRegex::parse("<video>").unwrap().matches(name.components()));
///
/// // The whole name: "app", then any number of components.
/// assert!(NdnRegex::parse("^<app><>*$").unwrap().matches(name.components()));
///
/// // Exactly two components, neither of them "app".
/// assert!(!NdnRegex::parse("^[^<app>]{2}$").unwrap().matches(name.components()));
/// ```
#[derive(Debug, Clone)]
pub struct NdnRegex {
    pattern: String,
    anchored_start: bool,
    anchored_end: bool,
    expression: RegexExpression,
}
impl NdnRegex {
    /// Parses a component regex.
    pub fn parse(pattern: &str) -> Result<Self, RegexParseError> {
        let tokens = RegexLexer::new(pattern).tokenize()?;
        let parsed = RegexParser::new(&tokens).parse()?;
        Ok(Self {
            pattern: pattern.to_string(),
            anchored_start: parsed.anchored_start,
            anchored_end: parsed.anchored_end,
            expression: parsed.expression,
        })
    }

    /// Returns the pattern the regex was parsed from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Checks if the regex matches the given components.
    pub fn matches(&self, components: &[Component]) -> bool {
        let mut starts = if self.anchored_start {
            0..=0
        } else {
            0..=components.len()
        };

        starts.any(|start| {
            let ends = self.expression.match_from(components, start);
            if self.anchored_end {
                ends.contains(&components.len())
            } else {
                !ends.is_empty()
            }
        })
    }
}
impl FromStr for NdnRegex {
    type Err = RegexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl fmt::Display for NdnRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Matches a single component.
#[derive(Debug, Clone)]
enum ComponentMatcher {
    Any,
    Pattern(regex::Regex),
}
impl ComponentMatcher {
    /// Compiles the text between the angle brackets of a component matcher.
    fn compile(pattern: &str, span: (usize, usize)) -> Result<Self, RegexParseError> {
        if pattern.is_empty() {
            return Ok(ComponentMatcher::Any);
        }
        regex::Regex::new(&format!("^(?:{pattern})$"))
            .map(ComponentMatcher::Pattern)
            .map_err(|e| {
                RegexParseError::new(
                    span,
                    format!("invalid component pattern '{pattern}': {e}").into(),
                )
            })
    }

    fn matches(&self, component: &Component) -> bool {
        match self {
            ComponentMatcher::Any => true,
            ComponentMatcher::Pattern(regex) => regex.is_match(&component.to_uri()),
        }
    }
}

/// An expression in a component regex.
#[derive(Debug, Clone)]
enum RegexExpression {
    Component(ComponentMatcher),
    Set {
        matchers: Vec<ComponentMatcher>,
        negated: bool,
    },
    Sequence(Vec<RegexExpression>),
    Or(Box<RegexExpression>, Box<RegexExpression>),
    Repeat {
        inner: Box<RegexExpression>,
        min: usize,
        max: Option<usize>,
    },
}
impl RegexExpression {
    /// Concatenates `next` to this expression, flattening sequences.
    fn then(self, next: RegexExpression) -> RegexExpression {
        match self {
            RegexExpression::Sequence(mut items) => {
                items.push(next);
                RegexExpression::Sequence(items)
            }
            first => RegexExpression::Sequence(vec![first, next]),
        }
    }

    /// Recursively matches the expression starting from `pos`, returning all valid next positions
    /// after consuming this expression.
    fn match_from(&self, components: &[Component], pos: usize) -> Vec<usize> {
        let mut valid_next_positions = match self {
            RegexExpression::Component(matcher) => {
                match components.get(pos) {
                    Some(component) if matcher.matches(component) => vec![pos + 1],
                    _ => vec![],
                }
            }

            RegexExpression::Set { matchers, negated } => {
                match components.get(pos) {
                    Some(component)
                        if matchers.iter().any(|m| m.matches(component)) != *negated =>
                    {
                        vec![pos + 1]
                    }
                    _ => vec![],
                }
            }

            RegexExpression::Sequence(items) => {
                let mut positions = vec![pos];
                for item in items {
                    positions = Self::step(item, components, &positions);
                    if positions.is_empty() {
                        break;
                    }
                }
                positions
            }

            RegexExpression::Or(a, b) => {
                let mut left = a.match_from(components, pos);
                left.append(&mut b.match_from(components, pos));
                left
            }

            RegexExpression::Repeat { inner, min, max } => {
                Self::repeated_matches(components, pos, inner, *min, *max)
            }
        };

        valid_next_positions.sort_unstable();
        valid_next_positions.dedup();
        valid_next_positions
    }

    /// Applies `expr` once from every position in `positions`.
    fn step(expr: &RegexExpression, components: &[Component], positions: &[usize]) -> Vec<usize> {
        let mut next: Vec<usize> = positions
            .iter()
            .flat_map(|&p| expr.match_from(components, p))
            .collect();
        next.sort_unstable();
        next.dedup();
        next
    }

    /// Collects all positions reachable by applying `inner` between `min` and `max` times.
    ///
    /// Positions are explored breadth first, so a position is first reached with the fewest
    /// repetitions and later visits can be skipped.
    fn repeated_matches(
        components: &[Component],
        pos: usize,
        inner: &RegexExpression,
        min: usize,
        max: Option<usize>,
    ) -> Vec<usize> {
        let mut frontier = vec![pos];
        for _ in 0..min {
            frontier = Self::step(inner, components, &frontier);
            if frontier.is_empty() {
                return frontier;
            }
        }

        let mut all = frontier.clone();
        let mut count = min;
        while !frontier.is_empty() && max.is_none_or(|max| count < max) {
            frontier = Self::step(inner, components, &frontier)
                .into_iter()
                .filter(|p| !all.contains(p))
                .collect();
            all.extend(&frontier);
            count += 1;
        }

        all
    }
}
