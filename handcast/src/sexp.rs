//! S-expression plist helpers shared by config loading, trace parsing
//! and status output.

use lexpr::Value;

/// Find the value following `:key` in a plist.
///
/// Walks cons pairs directly.  Handles both `Value::Keyword("key")`
/// (elisp parser) and `Value::Symbol(":key")` (default parser) forms.
pub fn get_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let prefixed = format!(":{}", key);
    let mut current = value;
    while let Value::Cons(pair) = current {
        let is_key = match pair.car() {
            Value::Keyword(k) => k.as_ref() == key,
            Value::Symbol(s) => s.as_ref() == prefixed,
            _ => false,
        };
        if is_key {
            return match pair.cdr() {
                Value::Cons(next) => Some(next.car()),
                _ => None,
            };
        }
        current = pair.cdr();
    }
    None
}

/// Extract a plist value rendered as a string (keywords without the colon).
pub fn get_keyword(value: &Value, key: &str) -> Option<String> {
    let val = get_value(value, key)?;
    Some(match val {
        Value::Keyword(v) => v.to_string(),
        Value::Symbol(v) => {
            let s = v.to_string();
            s.strip_prefix(':').unwrap_or(&s).to_string()
        }
        Value::String(v) => v.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => if *b { "t" } else { "nil" }.to_string(),
        Value::Null | Value::Nil => "nil".to_string(),
        _ => val.to_string(),
    })
}

/// Extract a floating-point value from a plist.
pub fn get_float(value: &Value, key: &str) -> Option<f64> {
    match get_value(value, key)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Extract a boolean value from a plist.  Treats "nil" as false.
pub fn get_bool(value: &Value, key: &str) -> Option<bool> {
    get_keyword(value, key).map(|s| s != "nil" && s != "#f")
}

/// Whether a value is the empty list or the symbol `nil`.
pub fn is_nil(value: &Value) -> bool {
    match value {
        Value::Null | Value::Nil => true,
        Value::Symbol(s) => s.as_ref() == "nil",
        Value::Bool(b) => !*b,
        _ => false,
    }
}

/// Collect the elements of a proper list.  Returns `None` for non-lists.
pub fn list_items(value: &Value) -> Option<Vec<&Value>> {
    let mut items = Vec::new();
    let mut current = value;
    loop {
        match current {
            Value::Cons(pair) => {
                items.push(pair.car());
                current = pair.cdr();
            }
            Value::Null => return Some(items),
            Value::Vector(elems) if items.is_empty() => return Some(elems.iter().collect()),
            _ => return None,
        }
    }
}

/// Read a list of numbers.  Returns `None` if any element is not numeric.
pub fn number_list(value: &Value) -> Option<Vec<f64>> {
    list_items(value)?
        .into_iter()
        .map(|v| match v {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
        .collect()
}

/// Escape a string for s-expression output.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a boolean the elisp way.
pub fn bool_sexp(b: bool) -> &'static str {
    if b {
        "t"
    } else {
        "nil"
    }
}
