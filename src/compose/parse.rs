//! Extract the build section of the compose service that produces an image

use crate::compose::ComposeOverride;
use crate::{FactsError, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// `build:` is either a bare context path or a full section
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BuildSpec {
    Context(String),
    Section(BuildSection),
}

#[derive(Debug, Default, Deserialize)]
struct BuildSection {
    #[serde(default)]
    dockerfile: Option<String>,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    target: Option<String>,
    /// Kept raw so a malformed `args` cannot discard the other fields
    #[serde(default)]
    args: Option<Value>,
}

/// `args:` as a mapping or as a list of `KEY=VALUE` entries
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BuildArgs {
    Map(Mapping),
    List(Vec<Value>),
}

/// Parse a compose file and return the build settings of the first service
/// whose `image` is `<image_name>:<tag>`.
pub fn parse(file_path: &Path, image_name: &str) -> Result<ComposeOverride> {
    let content = fs::read_to_string(file_path)?;
    parse_str(&content, image_name).map_err(|e| match e {
        FactsError::Yaml(err) => FactsError::InvalidCompose {
            path: file_path.to_path_buf(),
            reason: err.to_string(),
        },
        FactsError::InvalidCompose { reason, .. } => FactsError::InvalidCompose {
            path: file_path.to_path_buf(),
            reason,
        },
        other => other,
    })
}

/// Same as [`parse`], for compose content already in memory
pub fn parse_str(content: &str, image_name: &str) -> Result<ComposeOverride> {
    let document: Value = serde_yaml::from_str(content)?;

    let services = match document.get("services") {
        None | Some(Value::Null) => {
            tracing::warn!("No services found in compose file");
            return Ok(ComposeOverride::default());
        }
        Some(Value::Mapping(services)) => services,
        Some(_) => {
            return Err(FactsError::InvalidCompose {
                path: Default::default(),
                reason: "`services` is not a mapping".to_string(),
            })
        }
    };

    if services.is_empty() {
        tracing::warn!("No services found in compose file");
        return Ok(ComposeOverride::default());
    }

    let prefix = format!("{}:", image_name);
    for (name, service) in services {
        let matches = service
            .get("image")
            .and_then(Value::as_str)
            .is_some_and(|image| image.starts_with(&prefix));
        if !matches {
            continue;
        }

        tracing::info!(
            "Found matching service: {}",
            scalar_to_string(name).unwrap_or_default()
        );
        return match service.get("build") {
            None | Some(Value::Null) => Ok(ComposeOverride::default()),
            Some(build) => Ok(build_override(serde_yaml::from_value(build.clone())?)),
        };
    }

    tracing::info!("No compose service builds image {}", image_name);
    Ok(ComposeOverride::default())
}

fn build_override(spec: BuildSpec) -> ComposeOverride {
    match spec {
        BuildSpec::Context(context) => ComposeOverride {
            context: non_empty(Some(context)),
            ..Default::default()
        },
        BuildSpec::Section(section) => ComposeOverride {
            dockerfile: non_empty(section.dockerfile),
            context: non_empty(section.context),
            target: non_empty(section.target),
            build_args: section.args.map(collect_args).unwrap_or_default(),
        },
    }
}

fn collect_args(args: Value) -> std::collections::BTreeMap<String, String> {
    let args = match serde_yaml::from_value::<BuildArgs>(args) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Ignoring build args that are neither a mapping nor a list: {}", e);
            return Default::default();
        }
    };
    match args {
        BuildArgs::Map(map) => map
            .iter()
            .filter_map(|(key, value)| match (scalar_to_string(key), scalar_to_string(value)) {
                (Some(key), Some(value)) => Some((key, value)),
                _ => {
                    tracing::warn!("Skipping non-scalar build arg: {:?}", key);
                    None
                }
            })
            .collect(),
        BuildArgs::List(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(entry) => entry.split_once('='),
                _ => None,
            })
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
