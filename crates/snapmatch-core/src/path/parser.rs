//! Query string parser

use super::Segment;
use crate::errors::{Result, SnapError};
use std::iter::Peekable;
use std::str::Chars;

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
}

pub(super) fn parse_segments(source: &str) -> Result<Vec<Segment>> {
    let mut parser = Parser {
        source,
        chars: source.chars().peekable(),
    };
    parser.parse()
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> SnapError {
        SnapError::InvalidPath {
            path: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn parse(&mut self) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();

        match self.chars.peek() {
            None => return Err(self.error("path is empty")),
            Some('$') => {
                self.chars.next();
            }
            Some('[') => {}
            Some('.') => return Err(self.error("path cannot start with '.'")),
            // A leading bare name is shorthand for `$.name`
            Some(_) => segments.push(self.member_after_dot()?),
        }

        while let Some(c) = self.chars.next() {
            match c {
                '.' => segments.push(self.member_after_dot()?),
                '[' => segments.push(self.bracket()?),
                other => return Err(self.error(format!("unexpected character '{}'", other))),
            }
        }

        Ok(segments)
    }

    fn member_after_dot(&mut self) -> Result<Segment> {
        if self.chars.peek() == Some(&'*') {
            self.chars.next();
            return Ok(Segment::Wildcard);
        }
        if self.chars.peek() == Some(&'.') {
            return Err(self.error("recursive descent ('..') is not supported"));
        }

        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if matches!(c, '.' | '[' | ']' | '\'' | '"') || c.is_whitespace() {
                break;
            }
            name.push(c);
            self.chars.next();
        }

        if name.is_empty() {
            return Err(self.error("expected a member name"));
        }
        Ok(Segment::Members(vec![name]))
    }

    fn bracket(&mut self) -> Result<Segment> {
        self.skip_whitespace();
        let segment = match self.chars.peek() {
            Some('*') => {
                self.chars.next();
                Segment::Wildcard
            }
            Some('\'') | Some('"') => Segment::Members(self.list(Self::quoted)?),
            Some(c) if c.is_ascii_digit() => Segment::Indices(self.list(Self::index)?),
            Some(&c) => return Err(self.error(format!("unsupported selector starting with '{}'", c))),
            None => return Err(self.error("unterminated '['")),
        };

        self.skip_whitespace();
        match self.chars.next() {
            Some(']') => Ok(segment),
            Some(c) => Err(self.error(format!("expected ']' but found '{}'", c))),
            None => Err(self.error("unterminated '['")),
        }
    }

    /// Comma-separated items of one kind
    fn list<T>(&mut self, item: fn(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let mut items = vec![item(self)?];
        loop {
            self.skip_whitespace();
            if self.chars.peek() != Some(&',') {
                return Ok(items);
            }
            self.chars.next();
            self.skip_whitespace();
            items.push(item(self)?);
        }
    }

    fn index(&mut self) -> Result<usize> {
        let mut digits = String::new();
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        if digits.is_empty() {
            return Err(self.error("expected an array index"));
        }
        digits
            .parse()
            .map_err(|_| self.error(format!("array index '{}' is out of range", digits)))
    }

    fn quoted(&mut self) -> Result<String> {
        let quote = match self.chars.next() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted member name")),
        };

        let mut name = String::new();
        loop {
            match self.chars.next() {
                Some('\\') => match self.chars.next() {
                    Some(escaped) => name.push(escaped),
                    None => return Err(self.error("unterminated escape sequence")),
                },
                Some(c) if c == quote => return Ok(name),
                Some(c) => name.push(c),
                None => return Err(self.error("unterminated quoted name")),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }
}
