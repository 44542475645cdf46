use super::escape::unescape_nquads;
use crate::error::{RdfError, Result};
use crate::model::*;

/// Parse an N-Quads document into a Dataset.
///
/// Blank lines and `#` comment lines are skipped. A literal without a
/// datatype or language tag is kept as a simple literal.
pub fn parse(input: &str) -> Result<Dataset> {
    let mut dataset = Dataset::new();
    for (idx, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let quad = Line::new(trimmed, idx + 1).quad()?;
        dataset.add(quad);
    }
    tracing::debug!(quads = dataset.len(), "parsed N-Quads");
    Ok(dataset)
}

/// A term as read from the input, before its position is checked.
enum Term {
    Iri(NamedNode),
    Blank(BlankNode),
    Literal(Literal),
}

impl Term {
    fn kind(&self) -> &'static str {
        match self {
            Term::Iri(_) => "IRI",
            Term::Blank(_) => "blank node",
            Term::Literal(_) => "literal",
        }
    }
}

struct Line<'a> {
    input: &'a str,
    pos: usize,
    number: usize,
}

impl<'a> Line<'a> {
    fn new(input: &'a str, number: usize) -> Self {
        Self {
            input,
            pos: 0,
            number,
        }
    }

    fn error(&self, msg: impl std::fmt::Display) -> RdfError {
        RdfError::parse(format!("line {}: {msg}", self.number))
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek().filter(|c| *c == ' ' || *c == '\t') {
            self.bump(ch);
        }
    }

    fn eat(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.bump(ch);
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of line"))),
        }
    }

    /// Consume characters until one matches `stop`; returns the consumed slice.
    fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek().filter(|c| !stop(*c)) {
            self.bump(ch);
        }
        &self.input[start..self.pos]
    }

    fn quad(mut self) -> Result<Quad> {
        let subject = match self.term()? {
            Term::Iri(n) => Subject::Named(n),
            Term::Blank(b) => Subject::Blank(b),
            other => return Err(self.error(format!("{} in subject position", other.kind()))),
        };
        let predicate = match self.term()? {
            Term::Iri(n) => n,
            other => return Err(self.error(format!("{} in predicate position", other.kind()))),
        };
        let object = match self.term()? {
            Term::Iri(n) => Object::Named(n),
            Term::Blank(b) => Object::Blank(b),
            Term::Literal(l) => Object::Literal(l),
        };

        self.skip_whitespace();
        let graph = if self.peek() == Some('.') {
            GraphLabel::Default
        } else {
            match self.term()? {
                Term::Iri(n) => GraphLabel::Named(n),
                Term::Blank(b) => GraphLabel::Blank(b),
                other => return Err(self.error(format!("{} in graph position", other.kind()))),
            }
        };

        self.skip_whitespace();
        self.eat('.')?;
        self.skip_whitespace();
        match self.peek() {
            None | Some('#') => Ok(Quad {
                subject,
                predicate,
                object,
                graph,
            }),
            Some(_) => Err(self.error("unexpected content after '.'")),
        }
    }

    fn term(&mut self) -> Result<Term> {
        self.skip_whitespace();
        match self.peek() {
            Some('<') => Ok(Term::Iri(self.iri()?)),
            Some('_') => Ok(Term::Blank(self.blank()?)),
            Some('"') => Ok(Term::Literal(self.literal()?)),
            Some(ch) => Err(self.error(format!("unexpected character '{ch}'"))),
            None => Err(self.error("unexpected end of line")),
        }
    }

    fn iri(&mut self) -> Result<NamedNode> {
        self.eat('<')?;
        let iri = self.take_until(|c| c == '>');
        if self.peek().is_none() {
            return Err(self.error("unterminated IRI"));
        }
        self.bump('>');
        Ok(NamedNode::new(iri))
    }

    fn blank(&mut self) -> Result<BlankNode> {
        self.eat('_')?;
        self.eat(':')?;
        let raw = self.take_until(|c| c.is_whitespace() || c == '<' || c == '"');
        // A label may contain '.', but not end with one.
        let label = raw.trim_end_matches('.');
        self.pos -= raw.len() - label.len();
        if label.is_empty() {
            return Err(self.error("empty blank node label"));
        }
        Ok(BlankNode::new(label))
    }

    fn literal(&mut self) -> Result<Literal> {
        self.eat('"')?;
        let start = self.pos;
        let mut escaped = false;
        loop {
            match self.peek() {
                Some('"') if !escaped => break,
                Some(ch) => {
                    escaped = ch == '\\' && !escaped;
                    self.bump(ch);
                }
                None => return Err(self.error("unterminated string literal")),
            }
        }
        let raw = &self.input[start..self.pos];
        self.bump('"');
        let value = unescape_nquads(raw).map_err(|e| self.error(e))?;

        match self.peek() {
            Some('@') => {
                self.bump('@');
                let lang = self.take_until(|c| c.is_whitespace() || c == '.');
                if lang.is_empty() {
                    return Err(self.error("empty language tag"));
                }
                Ok(Literal::lang(value, lang))
            }
            Some('^') => {
                self.bump('^');
                self.eat('^')?;
                Ok(Literal::typed(value, self.iri()?))
            }
            _ => Ok(Literal::new(value)),
        }
    }
}
