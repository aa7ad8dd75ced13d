// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS Selector parsing and matching
//!
//! Tag and attribute compound selectors (`img[alt*="photo" i]`) and
//! comma-separated lists of them, which is all the profile and preview
//! lookups need. Combinators, classes, ids and pseudo-classes are
//! rejected rather than silently ignored.

use crate::error::{Error, Result};

use super::node::Node;

/// A comma-separated list of compound selectors; matches if any member does
#[derive(Debug, Clone)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

/// A parsed compound selector
#[derive(Debug, Clone)]
pub struct Selector {
    parts: Vec<SelectorPart>,
}

/// A part of a selector
#[derive(Debug, Clone)]
pub enum SelectorPart {
    /// Universal selector (*)
    Universal,
    /// Tag name
    Tag(String),
    /// Attribute selector ([attr], [attr=value], etc.)
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone)]
pub struct AttributeSelector {
    pub name: String,
    pub operator: Option<AttributeOperator>,
    pub value: Option<String>,
    pub case_insensitive: bool,
}

/// Attribute selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr=value] - exact match
    Equals,
    /// [attr~=value] - word in space-separated list
    Includes,
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch,
    /// [attr^=value] - starts with
    Prefix,
    /// [attr$=value] - ends with
    Suffix,
    /// [attr*=value] - contains substring
    Substring,
}

impl SelectorList {
    /// Parse a selector list such as `img[alt*='a' i], img[alt*='b' i]`
    pub fn parse(input: &str) -> Result<Self> {
        let selectors = split_top_level(input)
            .into_iter()
            .map(Selector::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { selectors })
    }

    /// Check if any selector in the list matches the node
    pub fn matches(&self, node: &Node) -> bool {
        self.selectors.iter().any(|sel| sel.matches(node))
    }

    /// Number of compound selectors in the list
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether the list is empty (never true for a parsed list)
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Split on commas that are not inside quotes or brackets
fn split_top_level(input: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth -= 1,
            (None, ',') if depth == 0 => {
                pieces.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&input[start..]);
    pieces
}

impl Selector {
    /// Parse a compound CSS selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::selector(selector, "Empty selector"));
        }

        SelectorParser::new(trimmed).parse()
    }

    /// Check if a node matches this selector
    pub fn matches(&self, node: &Node) -> bool {
        node.is_element() && self.parts.iter().all(|part| Self::part_matches(part, node))
    }

    fn part_matches(part: &SelectorPart, node: &Node) -> bool {
        match part {
            SelectorPart::Universal => true,
            SelectorPart::Tag(tag) => node
                .local_name()
                .map(|n| n.eq_ignore_ascii_case(tag))
                .unwrap_or(false),
            SelectorPart::Attribute(attr) => Self::attribute_matches(attr, node),
        }
    }

    fn attribute_matches(attr: &AttributeSelector, node: &Node) -> bool {
        let Some(value) = node.get_attribute(&attr.name) else {
            return false;
        };

        let (Some(op), Some(target)) = (&attr.operator, &attr.value) else {
            return true; // Just checking existence
        };

        let (value, target) = if attr.case_insensitive {
            (value.to_lowercase(), target.to_lowercase())
        } else {
            (value.to_string(), target.clone())
        };

        match op {
            AttributeOperator::Equals => value == target,
            AttributeOperator::Includes => value.split_whitespace().any(|w| w == target),
            AttributeOperator::DashMatch => {
                value == target || value.starts_with(&format!("{}-", target))
            }
            // Empty targets never match for the substring family, as in browsers
            AttributeOperator::Prefix => !target.is_empty() && value.starts_with(&target),
            AttributeOperator::Suffix => !target.is_empty() && value.ends_with(&target),
            AttributeOperator::Substring => !target.is_empty() && value.contains(&target),
        }
    }
}

/// Compound selector parser
struct SelectorParser<'a> {
    source: &'a str,
    input: Vec<char>,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::selector(self.source, reason)
    }

    fn parse(&mut self) -> Result<Selector> {
        let mut parts = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                '[' => parts.push(SelectorPart::Attribute(self.parse_attribute()?)),
                '*' => {
                    self.advance();
                    parts.push(SelectorPart::Universal);
                }
                c if c.is_alphabetic() || c == '_' || c == '-' => {
                    let tag = self.read_identifier()?;
                    parts.push(SelectorPart::Tag(tag.to_lowercase()));
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                    return Err(self.error("Combinators are not supported"));
                }
                c => return Err(self.error(format!("Unexpected character '{}'", c))),
            }
        }

        if parts.is_empty() {
            return Err(self.error("Invalid selector"));
        }

        Ok(Selector { parts })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> Result<String> {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                result.push(c);
                self.advance();
            } else {
                break;
            }
        }
        if result.is_empty() {
            return Err(self.error("Expected identifier"));
        }
        Ok(result)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector> {
        self.advance(); // consume '['

        self.skip_whitespace();
        let name = self.read_identifier()?.to_lowercase();
        self.skip_whitespace();

        let mut operator = None;
        let mut value = None;
        let mut case_insensitive = false;

        if let Some(c) = self.peek() {
            if c != ']' {
                self.advance();
                let op = match c {
                    '=' => AttributeOperator::Equals,
                    '~' => AttributeOperator::Includes,
                    '|' => AttributeOperator::DashMatch,
                    '^' => AttributeOperator::Prefix,
                    '$' => AttributeOperator::Suffix,
                    '*' => AttributeOperator::Substring,
                    _ => return Err(self.error(format!("Unknown operator: {}", c))),
                };
                if op != AttributeOperator::Equals {
                    self.expect('=')?;
                }
                operator = Some(op);

                self.skip_whitespace();
                value = Some(self.read_string_or_ident()?);
                self.skip_whitespace();

                if let Some('i') | Some('I') = self.peek() {
                    case_insensitive = true;
                    self.advance();
                    self.skip_whitespace();
                }
            }
        }

        self.expect(']')?;

        Ok(AttributeSelector {
            name,
            operator,
            value,
            case_insensitive,
        })
    }

    fn read_string_or_ident(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ '"') | Some(q @ '\'') => q,
            _ => return self.read_identifier(),
        };
        self.advance();

        let mut result = String::new();
        while let Some(c) = self.advance() {
            if c == quote {
                return Ok(result);
            }
            if c == '\\' {
                if let Some(escaped) = self.advance() {
                    result.push(escaped);
                }
            } else {
                result.push(c);
            }
        }

        Err(self.error("Unterminated string"))
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("Expected '{}', got '{}'", expected, c))),
            None => Err(self.error(format!("Expected '{}', got EOF", expected))),
        }
    }
}
