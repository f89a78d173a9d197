//! Normalization of whatever the n8n workflow sends back.
//!
//! The webhook is expected to answer `{"output": "..."}` or
//! `[{"output": "..."}]`, but workflows get edited and sometimes answer with
//! other shapes or plain text. Every shape is folded into a JSON object that
//! carries an `output` key.

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    Object(Map<String, Value>),
    List(Vec<Value>),
    /// JSON string, number, bool or null.
    Scalar(Value),
    /// Body that is not JSON at all.
    Text(String),
}

impl UpstreamReply {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => UpstreamReply::Text(body.to_string()),
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => UpstreamReply::Object(map),
            Value::Array(items) => UpstreamReply::List(items),
            other => UpstreamReply::Scalar(other),
        }
    }
}

pub fn normalize(reply: UpstreamReply) -> Map<String, Value> {
    let effective = match reply {
        UpstreamReply::Text(raw) => return output(raw),
        UpstreamReply::List(mut items) if !items.is_empty() => items.swap_remove(0),
        UpstreamReply::List(items) => Value::Array(items),
        UpstreamReply::Object(map) => Value::Object(map),
        UpstreamReply::Scalar(value) => value,
    };

    match effective {
        Value::Object(map) if map.contains_key("output") => map,
        other => output(python_str(&other)),
    }
}

fn output(text: String) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("output".to_string(), Value::String(text));
    map
}

/// Renders a value the way Python's `str()` renders the decoded JSON.
/// Top-level strings come out bare, nested ones quoted.
pub fn python_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => python_repr(other),
    }
}

fn python_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => python_number(n),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(python_repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), python_repr(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Floats follow Python's `repr`: scientific outside `1e-4..1e16`, with a
/// signed two-digit exponent, and a trailing `.0` on whole values.
fn python_number(n: &Number) -> String {
    let f = match n.as_f64() {
        Some(f) if n.is_f64() => f,
        _ => return n.to_string(),
    };

    let sci = format!("{:e}", f);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let fixed = f.to_string();
        if fixed.contains('.') { fixed } else { format!("{}.0", fixed) }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

fn quote(s: &str) -> String {
    // Python switches to double quotes when that avoids escaping.
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
