use crate::cli::PayloadCommands;
use crate::config::Config;
use crate::error::{MorphError, Result};
use crate::payload::merge::{
    booleanize, deep_compact, deep_merge_with, deep_merged, keys_to_case, BooleanTokens, KeyCase, Mapping,
};
use crate::payload::options::parse_option_pairs;
use crate::payload::source::load_mapping;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

/// How a list of partial payloads is folded into a request body.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub concat_arrays: bool,
    pub compact: bool,
    pub booleanize: Option<BooleanTokens>,
    pub require_changes: bool,
    pub wrap: Option<String>,
}

impl Assembly {
    pub fn from_config(config: &Config) -> Self {
        Assembly {
            concat_arrays: false,
            compact: config.payload.compact,
            booleanize: config.payload.booleanize.then(|| config.payload.boolean_tokens()),
            require_changes: false,
            wrap: None,
        }
    }
}

pub async fn handle_command(cmd: &PayloadCommands, config: &Config) -> Result<()> {
    match cmd {
        PayloadCommands::Build {
            templates,
            payloads,
            options,
            wrap,
            concat_arrays,
            no_compact,
            no_booleanize,
            require_changes,
            compact_json,
        } => {
            let mut assembly = Assembly::from_config(config);
            assembly.concat_arrays = *concat_arrays;
            assembly.compact &= !*no_compact;
            if *no_booleanize {
                assembly.booleanize = None;
            }
            assembly.require_changes = *require_changes;
            assembly.wrap = wrap.clone();

            let layers = collect_layers(templates, payloads, options).await?;
            let body = assemble(&layers, &assembly)?;

            if let Some(appliance) = &config.general.appliance {
                info!("📦 Payload assembled for appliance: {}", appliance);
            }
            print_json(&body, config.payload.pretty && !*compact_json)?;
        }
        PayloadCommands::Keys {
            file,
            case,
            compact_json,
        } => {
            let mut map = load_mapping(file).await?;
            keys_to_case(&mut map, KeyCase::from(*case));
            print_json(&Value::Object(map), config.payload.pretty && !*compact_json)?;
        }
    }
    Ok(())
}

/// Load every source in merge order: templates, payload files, then options.
pub async fn collect_layers(
    templates: &[PathBuf],
    payloads: &[PathBuf],
    options: &[String],
) -> Result<Vec<Mapping>> {
    let mut layers = Vec::with_capacity(templates.len() + payloads.len() + 1);

    for path in templates.iter().chain(payloads) {
        layers.push(load_mapping(path).await?);
    }

    if !options.is_empty() {
        layers.push(parse_option_pairs(options)?);
    }

    Ok(layers)
}

/// Merge `layers` in order, then compact, booleanize and wrap as configured.
pub fn assemble(layers: &[Mapping], assembly: &Assembly) -> Result<Value> {
    let mut payload = if assembly.concat_arrays {
        let mut merged = Mapping::new();
        for layer in layers {
            deep_merge_with(&mut merged, layer, &mut concat_sequences);
        }
        merged
    } else {
        layers.iter().fold(Mapping::new(), |merged, layer| deep_merged(&merged, layer))
    };
    debug!("merged {} payload layers ({} top-level fields)", layers.len(), payload.len());

    if assembly.compact {
        deep_compact(&mut payload);
    }
    if let Some(tokens) = &assembly.booleanize {
        booleanize(&mut payload, tokens);
    }

    if assembly.require_changes && payload.is_empty() {
        return Err(MorphError::empty_payload());
    }

    Ok(match &assembly.wrap {
        Some(key) => {
            let mut wrapped = Mapping::new();
            wrapped.insert(key.clone(), Value::Object(payload));
            Value::Object(wrapped)
        }
        None => Value::Object(payload),
    })
}

fn concat_sequences(_key: &str, existing: &Value, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Value::Array(existing), Value::Array(incoming)) => {
            Value::Array(existing.iter().chain(incoming).cloned().collect())
        }
        _ => incoming.clone(),
    }
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
