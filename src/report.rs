use std::fmt;

use serde_json::Value;

use crate::config::RunContext;

pub const OK_TITLE: &str = "Checkin OK";
pub const ERROR_TITLE: &str = "Checkin Error";

/// The three lines a run produces: title, detail, extra context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinReport {
    lines: [String; 3],
}

impl CheckinReport {
    pub fn success(message: Option<&Value>, left_days: LeftDays) -> Self {
        Self {
            lines: [
                OK_TITLE.to_string(),
                render_message(message),
                format!("Left Days {}", left_days),
            ],
        }
    }

    pub fn failure(error: &dyn fmt::Display, context: &RunContext) -> Self {
        Self {
            lines: [
                ERROR_TITLE.to_string(),
                error.to_string(),
                context.diagnostic_link(),
            ],
        }
    }

    pub fn title(&self) -> &str {
        &self.lines[0]
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_success(&self) -> bool {
        self.title() == OK_TITLE
    }

    /// Lines joined the way the push provider renders line breaks.
    pub fn joined(&self, separator: &str) -> String {
        self.lines.join(separator)
    }
}

/// `leftDays` after numeric coercion. NaN marks a missing or unreadable value.
#[derive(Debug, Clone, Copy)]
pub struct LeftDays(pub f64);

impl LeftDays {
    pub fn coerce(raw: Option<&Value>) -> Self {
        Self(raw.map_or(f64::NAN, coerce_value))
    }
}

impl fmt::Display for LeftDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;
        if n.is_nan() {
            f.write_str("NaN")
        } else if n.is_infinite() {
            f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
        } else if n == 0.0 {
            // covers -0
            f.write_str("0")
        } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
            // exponent form with an explicit sign: 1e+21, 1.5e-7
            let exp = format!("{:e}", n);
            match exp.split_once('e') {
                Some((mantissa, power)) if !power.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, power)
                }
                _ => f.write_str(&exp),
            }
        } else {
            write!(f, "{}", n)
        }
    }
}

fn coerce_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_str(s),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            // a one-item array coerces through its own text
            [only] => coerce_array_item(only),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn coerce_array_item(item: &Value) -> f64 {
    match item {
        // null joins to "", booleans to "true"/"false"
        Value::Null => 0.0,
        Value::Bool(_) => f64::NAN,
        other => coerce_value(other),
    }
}

fn coerce_str(raw: &str) -> f64 {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(radix) = radix_prefix(s) {
        return parse_radix(&s[2..], radix);
    }
    // f64::from_str also takes "inf"/"nan", which are not numbers here
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_prefix(s: &str) -> Option<u32> {
    match s.get(..2)? {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

// Digits only, no sign; accumulates in f64 so long literals don't overflow.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    value
}

fn render_message(message: Option<&Value>) -> String {
    match message {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
