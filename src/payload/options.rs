use crate::error::{MorphError, Result};
use crate::payload::merge::{deep_merge, Mapping};
use serde_json::Value;

/// Parse `-O key=value` pairs into a nested mapping.
///
/// Dotted keys address nested mappings (`config.size=10`). Values stay
/// strings; later pairs override earlier ones with deep-merge semantics.
pub fn parse_option_pairs(pairs: &[String]) -> Result<Mapping> {
    let mut parsed = Mapping::new();

    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(MorphError::invalid_option(pair.as_str(), "Use key=value"));
        };

        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(MorphError::invalid_option(pair.as_str(), "Option keys must not be empty"));
        }

        let nested = nest(&segments, Value::String(value.to_string()));
        deep_merge(&mut parsed, &nested);
    }

    Ok(parsed)
}

fn nest(segments: &[&str], leaf: Value) -> Mapping {
    let mut node = Mapping::new();
    match segments {
        [] => {}
        [last] => {
            node.insert(last.to_string(), leaf);
        }
        [first, rest @ ..] => {
            node.insert(first.to_string(), Value::Object(nest(rest, leaf)));
        }
    }
    node
}
