//! Catalog validation
//!
//! Checks the shape of a parsed catalog before it enters the store. Checks run
//! in document order and stop at the first failure, so the error always names
//! a single field.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::{CatalogConfig, CatalogSnapshot, ContentType, SiteEntry};

type Result<T> = std::result::Result<T, ValidationError>;

/// Validate a parsed catalog document
///
/// On success the returned snapshot owns copies of every field; the input
/// value is not retained.
pub fn validate(raw: &Value) -> Result<CatalogSnapshot> {
    let root = as_object(raw, "$")?;

    let config = validate_config(field(root, "config"), "config")?;

    let sites = match field(root, "sites") {
        Some(Value::Array(items)) => items,
        other => return Err(expected("sites", "array", other)),
    };

    let mut entries = Vec::with_capacity(sites.len());
    let mut seen = HashSet::with_capacity(sites.len());
    for (index, item) in sites.iter().enumerate() {
        let path = format!("sites[{}]", index);
        let entry = validate_entry(item, &path)?;
        if !seen.insert(entry.id) {
            return Err(ValidationError::new(
                format!("{}.id", path),
                format!("duplicate id {}", entry.id),
            ));
        }
        entries.push(entry);
    }

    Ok(CatalogSnapshot::new(config, entries))
}

fn validate_config(value: Option<&Value>, path: &str) -> Result<CatalogConfig> {
    let obj = match value {
        Some(Value::Object(obj)) => obj,
        other => return Err(expected(path, "object", other)),
    };

    Ok(CatalogConfig {
        site_title: string_field(obj, path, "siteTitle")?,
        admin_contact: string_field(obj, path, "adminContact")?,
    })
}

fn validate_entry(value: &Value, path: &str) -> Result<SiteEntry> {
    let obj = as_object(value, path)?;

    let id = match field(obj, "id") {
        Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
        // Whole numbers beyond i64 are integers but unrepresentable here
        Some(Value::Number(n)) if n.is_u64() => None,
        other => return Err(expected(&join(path, "id"), "integer", other)),
    }
    .ok_or_else(|| ValidationError::new(join(path, "id"), "integer out of range"))?;

    let title = string_field(obj, path, "title")?;
    let cover_url = string_field(obj, path, "cover")?;
    let target_url = string_field(obj, path, "url")?;
    let description = string_field(obj, path, "description")?;

    let tags_path = join(path, "tags");
    let tags = match field(obj, "tags") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, tag)| match tag {
                Value::String(s) => Ok(s.clone()),
                other => Err(expected(
                    &format!("{}[{}]", tags_path, i),
                    "string",
                    Some(other),
                )),
            })
            .collect::<Result<Vec<_>>>()?,
        other => return Err(expected(&tags_path, "array of strings", other)),
    };

    let content = match optional_field(obj, "content") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        other => return Err(expected(&join(path, "content"), "string", other)),
    };

    let content_type_path = join(path, "contentType");
    let content_type = match optional_field(obj, "contentType") {
        None => None,
        Some(Value::String(s)) => Some(ContentType::from_wire(s).ok_or_else(|| {
            ValidationError::new(
                &content_type_path,
                format!("expected \"text\" or \"file\", got \"{}\"", s),
            )
        })?),
        other => return Err(expected(&content_type_path, "\"text\" or \"file\"", other)),
    };

    Ok(SiteEntry {
        id,
        title,
        description,
        cover_url,
        target_url,
        tags,
        content,
        content_type,
    })
}

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name)
}

/// Look up an optional field, treating JSON `null` as absent
fn optional_field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    field(obj, name).filter(|v| !v.is_null())
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| expected(path, "object", Some(value)))
}

fn string_field(obj: &Map<String, Value>, parent: &str, name: &str) -> Result<String> {
    match field(obj, name) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(expected(&join(parent, name), "string", other)),
    }
}

fn join(parent: &str, name: &str) -> String {
    format!("{}.{}", parent, name)
}

fn expected(path: &str, what: &str, found: Option<&Value>) -> ValidationError {
    let reason = match found {
        None => format!("missing required field, expected {}", what),
        Some(value) => format!("expected {}, found {}", what, type_name(value)),
    };
    ValidationError::new(path, reason)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
