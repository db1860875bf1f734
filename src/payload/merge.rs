//! Tree transformations used to assemble request payloads.
//!
//! Payloads are built from several partial sources (templates, payload files,
//! `-O` options, configured defaults). These helpers combine and clean them
//! before the body is handed to the API client.

use serde_json::{Map, Value};

/// An ordered, string-keyed mapping node.
pub type Mapping = Map<String, Value>;

/// Recursively merge `source` into `target`.
///
/// Nested mappings present on both sides are merged key by key. Any other
/// value in `source` (scalar, sequence, or a type mismatch) replaces the
/// value in `target`. Sequences are never merged element-wise.
pub fn deep_merge<'a>(target: &'a mut Mapping, source: &Mapping) -> &'a mut Mapping {
    deep_merge_with(target, source, &mut |_: &str, _: &Value, incoming: &Value| {
        incoming.clone()
    })
}

/// Non-mutating variant of [`deep_merge`].
pub fn deep_merged(target: &Mapping, source: &Mapping) -> Mapping {
    let mut merged = target.clone();
    deep_merge(&mut merged, source);
    merged
}

/// Recursively merge `source` into `target`, resolving scalar conflicts with
/// `on_conflict`.
///
/// The callback receives `(key, existing, incoming)` only when both sides
/// hold a non-mapping value for the same key; its return value is stored.
/// Keys absent from `target` are inserted as-is, and a mapping on only one
/// side is overwritten by the source.
pub fn deep_merge_with<'a, F>(
    target: &'a mut Mapping,
    source: &Mapping,
    on_conflict: &mut F,
) -> &'a mut Mapping
where
    F: FnMut(&str, &Value, &Value) -> Value,
{
    for (key, incoming) in source {
        match target.get_mut(key) {
            Some(existing) => merge_value(key, existing, incoming, on_conflict),
            None => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
    target
}

fn merge_value<F>(key: &str, existing: &mut Value, incoming: &Value, on_conflict: &mut F)
where
    F: FnMut(&str, &Value, &Value) -> Value,
{
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            deep_merge_with(existing, incoming, on_conflict);
        }
        (existing, incoming) if existing.is_object() || incoming.is_object() => {
            *existing = incoming.clone();
        }
        (existing, incoming) => {
            let resolved = on_conflict(key, existing, incoming);
            *existing = resolved;
        }
    }
}

/// Remove `null` and empty-string entries from `node`, recursing into nested
/// mappings.
///
/// Nested mappings that end up empty are kept. Sequences are never shortened:
/// only their mapping elements are compacted, blank scalar elements stay.
pub fn deep_compact(node: &mut Mapping) -> &mut Mapping {
    node.retain(|_, value| !is_blank(value));
    for value in node.values_mut() {
        match value {
            Value::Object(child) => {
                deep_compact(child);
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::Object(child) = item {
                        deep_compact(child);
                    }
                }
            }
            _ => {}
        }
    }
    node
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// String tokens that `booleanize` turns into real booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanTokens {
    pub truthy: Vec<String>,
    pub falsy: Vec<String>,
}

impl Default for BooleanTokens {
    fn default() -> Self {
        BooleanTokens {
            truthy: vec!["true".to_string(), "on".to_string()],
            falsy: vec!["false".to_string(), "off".to_string()],
        }
    }
}

impl BooleanTokens {
    pub fn new<I, S>(truthy: I, falsy: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BooleanTokens {
            truthy: truthy.into_iter().map(Into::into).collect(),
            falsy: falsy.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-sensitive exact match; `None` when the token is not recognised.
    pub fn resolve(&self, token: &str) -> Option<bool> {
        if self.truthy.iter().any(|t| t == token) {
            Some(true)
        } else if self.falsy.iter().any(|t| t == token) {
            Some(false)
        } else {
            None
        }
    }
}

/// Replace string scalars matching `tokens` with booleans.
///
/// Walks the tree the same way as [`deep_compact`]. Anything that is not a
/// matching string is left untouched.
pub fn booleanize<'a>(node: &'a mut Mapping, tokens: &BooleanTokens) -> &'a mut Mapping {
    for value in node.values_mut() {
        match value {
            Value::Object(child) => {
                booleanize(child, tokens);
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::Object(child) = item {
                        booleanize(child, tokens);
                    }
                }
            }
            Value::String(s) => {
                if let Some(flag) = tokens.resolve(s) {
                    *value = Value::Bool(flag);
                }
            }
            _ => {}
        }
    }
    node
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Upper,
    Lower,
    Capitalize,
}

impl KeyCase {
    pub fn apply(self, key: &str) -> String {
        match self {
            KeyCase::Upper => key.to_uppercase(),
            KeyCase::Lower => key.to_lowercase(),
            KeyCase::Capitalize => {
                let mut chars = key.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Rewrite the top-level keys of `node` with `casing`. Nested keys are left
/// alone.
///
/// Keys that fold to the same name collide: the last one in iteration order
/// wins and earlier values are dropped.
pub fn keys_to_case(node: &mut Mapping, casing: KeyCase) -> &mut Mapping {
    let original = std::mem::take(node);
    for (key, value) in original {
        node.insert(casing.apply(&key), value);
    }
    node
}
