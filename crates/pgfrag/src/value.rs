//! Bound parameter values.
//!
//! [`Value`] is the scalar that travels in [`QueryFragment::values`](crate::QueryFragment).
//! It implements [`ToSql`], so a fragment's values can be handed to a
//! tokio-postgres client as-is. The target column type decides the wire
//! encoding: an `Int` binds to `INT2`, `INT4`, `INT8`, `FLOAT4`, `FLOAT8` or
//! `NUMERIC` alike, and a `Float` or a decimal `Text` (`"0.657"`) binds to
//! `NUMERIC` as well.

use std::error::Error;

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use tokio_postgres::types::{IsNull, ToSql, Type, WrongType};

/// A scalar bind parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Whether this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text, for `Text` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, for `Int` values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = serde_json::Value;

    /// Convert a JSON scalar. Arrays and objects are handed back as the error.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::String(s) => Ok(Value::Text(s)),
            Json::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Value::Int(i)),
                (None, Some(f)) => Ok(Value::Float(f)),
                (None, None) => Err(Json::Number(n)),
            },
            other => Err(other),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) if <bool as ToSql>::accepts(ty) => b.to_sql(ty, out),
            Value::Int(n) => encode_int(*n, ty, out),
            Value::Float(f) if *ty == Type::FLOAT4 => (*f as f32).to_sql(ty, out),
            Value::Float(f) if *ty == Type::FLOAT8 => f.to_sql(ty, out),
            Value::Float(f) if *ty == Type::NUMERIC => encode_float_numeric(*f, out),
            Value::Text(s) if <&str as ToSql>::accepts(ty) => s.as_str().to_sql(ty, out),
            Value::Text(s) if *ty == Type::NUMERIC => encode_numeric(s, out),
            _ => Err(Box::new(WrongType::new::<Value>(ty.clone()))),
        }
    }

    // Per-variant checks live in `to_sql`; `Null` binds to any column type.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

fn encode_int(n: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    match *ty {
        Type::INT2 => i16::try_from(n)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(n)?.to_sql(ty, out),
        Type::INT8 => n.to_sql(ty, out),
        Type::FLOAT4 => (n as f32).to_sql(ty, out),
        Type::FLOAT8 => (n as f64).to_sql(ty, out),
        Type::NUMERIC => encode_numeric(&n.to_string(), out),
        _ => Err(Box::new(WrongType::new::<Value>(ty.clone()))),
    }
}

fn encode_float_numeric(f: f64, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    if !f.is_finite() {
        return Err(format!("cannot bind {f} to numeric").into());
    }
    // `Display` for f64 never uses exponent notation.
    encode_numeric(&f.to_string(), out)
}

/// Binary `NUMERIC` from decimal text (`-12.050`): ndigits, weight, sign,
/// dscale, then base-10000 digits most significant first.
fn encode_numeric(text: &str, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    let invalid = || format!("invalid numeric literal: {text:?}");

    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid().into());
    }
    let dscale = u16::try_from(frac_part.len())
        .ok()
        .filter(|d| *d <= 0x3FFF)
        .ok_or_else(invalid)?;

    // Align both halves on the decimal point in groups of four digits.
    let int_part = int_part.trim_start_matches('0');
    let int_pad = (4 - int_part.len() % 4) % 4;
    let frac_pad = (4 - frac_part.len() % 4) % 4;
    let aligned: Vec<u8> = std::iter::repeat_n(b'0', int_pad)
        .chain(int_part.bytes())
        .chain(frac_part.bytes())
        .chain(std::iter::repeat_n(b'0', frac_pad))
        .collect();
    let mut digits: Vec<i16> = aligned
        .chunks(4)
        .map(|c| c.iter().fold(0i16, |acc, b| acc * 10 + i16::from(b - b'0')))
        .collect();

    let mut weight = ((int_pad + int_part.len()) / 4) as i32 - 1;
    let leading = digits.iter().take_while(|d| **d == 0).count();
    digits.drain(..leading);
    weight -= leading as i32;
    while digits.last() == Some(&0) {
        digits.pop();
    }
    if digits.is_empty() {
        weight = 0;
    }
    let weight = i16::try_from(weight).map_err(|_| invalid())?;
    let ndigits = i16::try_from(digits.len()).map_err(|_| invalid())?;
    let sign = if negative && !digits.is_empty() { 0x4000 } else { 0x0000 };

    out.put_i16(ndigits);
    out.put_i16(weight);
    out.put_u16(sign);
    out.put_u16(dscale);
    for d in digits {
        out.put_i16(d);
    }
    Ok(IsNull::No)
}
