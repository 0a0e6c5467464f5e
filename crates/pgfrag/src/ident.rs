//! Column identifier validation.
//!
//! Column names are the only text a builder interpolates into a fragment, so
//! every name coming out of a [`ColumnMapping`](crate::ColumnMapping) goes
//! through [`Ident::parse`] first. An unmapped update key that does not parse
//! is taken as one literal column name via [`Ident::quoted`].
//!
//! - Unquoted parts must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts allow anything except NUL and escape `"` as `""`
//! - Parts may be joined with `.` (`companies.num_employees`)

use std::fmt;

use crate::error::{FragError, FragResult};

/// One dot-separated part of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A validated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    parts: Vec<IdentPart>,
}

impl Ident {
    /// Parse and validate an identifier such as `num_employees`,
    /// `public.companies` or `"Logo URL"`.
    pub fn parse(raw: &str) -> FragResult<Self> {
        if raw.is_empty() {
            return Err(FragError::invalid_identifier("empty column name"));
        }
        if raw.contains('\0') {
            return Err(reject(raw, "contains a NUL character"));
        }

        let mut parts = Vec::new();
        let mut rest = raw;
        loop {
            let (part, tail) = if let Some(quoted) = rest.strip_prefix('"') {
                split_quoted(raw, quoted)?
            } else {
                split_unquoted(raw, rest)?
            };
            parts.push(part);

            match tail.strip_prefix('.') {
                Some("") => return Err(reject(raw, "ends with '.'")),
                Some(next) => rest = next,
                None if tail.is_empty() => break,
                None => return Err(reject(raw, "expected '.' after quoted part")),
            }
        }

        Ok(Self { parts })
    }

    /// Treat `name` as a single column name and render it quoted, so
    /// `first name` becomes `"first name"`. Only empty names and NUL fail.
    pub fn quoted(name: &str) -> FragResult<Self> {
        if name.is_empty() {
            return Err(FragError::invalid_identifier("empty column name"));
        }
        if name.contains('\0') {
            return Err(reject(name, "contains a NUL character"));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// The dot-separated parts, in order.
    pub fn parts(&self) -> &[IdentPart] {
        &self.parts
    }

    /// Render the identifier as SQL text.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                IdentPart::Unquoted(name) => f.write_str(name)?,
                IdentPart::Quoted(name) => write!(f, "\"{}\"", name.replace('"', "\"\""))?,
            }
        }
        Ok(())
    }
}

fn reject(raw: &str, reason: &str) -> FragError {
    FragError::invalid_identifier(format!("{raw:?} {reason}"))
}

/// Split one quoted part off `body` (the text after the opening quote).
fn split_quoted<'a>(raw: &str, body: &'a str) -> FragResult<(IdentPart, &'a str)> {
    let mut name = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            name.push(c);
            continue;
        }
        if matches!(chars.peek(), Some((_, '"'))) {
            chars.next();
            name.push('"');
            continue;
        }
        if name.is_empty() {
            return Err(reject(raw, "has an empty quoted part"));
        }
        return Ok((IdentPart::Quoted(name), &body[i + 1..]));
    }
    Err(reject(raw, "has an unclosed quote"))
}

fn split_unquoted<'a>(raw: &str, text: &'a str) -> FragResult<(IdentPart, &'a str)> {
    let end = text.find('.').unwrap_or(text.len());
    let name = &text[..end];

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(reject(raw, "has an empty part")),
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        Some(c) => return Err(reject(raw, &format!("cannot start with '{c}'"))),
    }
    if let Some(c) = chars.find(|c| !(*c == '_' || *c == '$' || c.is_ascii_alphanumeric())) {
        return Err(reject(raw, &format!("contains '{c}'")));
    }

    Ok((IdentPart::Unquoted(name.to_string()), &text[end..]))
}
