//! Host value model
//!
//! Mirrors the dynamic value types a SQL engine passes to extension functions.

use std::borrow::Cow;

/// A single SQL value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Bytes hashed into a filter for this value
    ///
    /// Text and blobs hash their raw bytes. Numbers hash the text the host
    /// produces when coercing them: integers in decimal, reals with 15
    /// significant digits in `%!.15g` style (`0.3`, `1.0`, `1.0e+20`). `Null`
    /// has no key.
    pub fn key_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Value::Null => None,
            Value::Integer(i) => Some(Cow::Owned(i.to_string().into_bytes())),
            Value::Real(r) => Some(Cow::Owned(real_to_text(*r).into_bytes())),
            Value::Text(s) => Some(Cow::Borrowed(s.as_bytes())),
            Value::Blob(b) => Some(Cow::Borrowed(b.as_slice())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// SQL type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

/// Render a real as `printf("%!.15g")` does
fn real_to_text(r: f64) -> String {
    if r.is_nan() {
        return "NaN".to_string();
    }
    if r.is_infinite() {
        return if r > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }

    let sign = if r.is_sign_negative() { "-" } else { "" };
    // 15 significant digits, correctly rounded: "d.dddddddddddddde<exp>"
    let scientific = format!("{:.14e}", r.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    if !(-4..15).contains(&exponent) {
        let (lead, rest) = digits.split_at(1);
        let fraction = rest.trim_end_matches('0');
        let fraction = if fraction.is_empty() { "0" } else { fraction };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}{}.{}e{}{:02}",
            sign,
            lead,
            fraction,
            exp_sign,
            exponent.unsigned_abs()
        );
    }

    let (whole, fraction) = if exponent >= 0 {
        let split = exponent as usize + 1;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        ("0".to_string(), format!("{}{}", zeros, digits))
    };
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    format!("{}{}.{}", sign, whole, fraction)
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Blob(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

/// SQL has no boolean type; truth values are integers
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Integer(b as i64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
