//! Two-phase content parsing: YAML text → generic `serde_yaml::Value` tree →
//! validated `CareerRecord`.
//!
//! The generic tree is walked by hand rather than deserialized straight into
//! the record types so that every violation can name the exact field path
//! (`sections[2].items[0]`) instead of a line/column from the YAML parser.
//! Null counts as absent everywhere.

use serde_yaml::{Mapping, Value};

use crate::careers::error::CareerError;
use crate::careers::models::{CareerRecord, Contact, Item, ItemValue, Section};
use crate::careers::validation::{validate_date_format, validate_value_policy, ValuePolicy};

const REQUIRED_FIELDS: &[&str] = &["title", "last_update", "sections"];

/// Parses one content file into a record whose `id` is `derived_id`.
///
/// Checks run in a fixed order and the first violation is returned:
/// syntax, required top-level fields, section/item shape, contact shape,
/// `last_update` format, then the value policy.
pub fn parse(
    raw_text: &str,
    derived_id: &str,
    policy: ValuePolicy,
) -> Result<CareerRecord, CareerError> {
    let document: Value = serde_yaml::from_str(raw_text).map_err(|e| CareerError::Syntax {
        detail: e.to_string(),
    })?;

    let empty = Mapping::new();
    let root = match untag(&document) {
        Value::Mapping(map) => map,
        _ => &empty,
    };

    for &name in REQUIRED_FIELDS {
        if field(root, name).is_none() {
            return Err(CareerError::missing_field(name));
        }
    }

    let title = match field(root, "title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::String(_)) => {
            return Err(CareerError::Schema(
                "field 'title' must not be empty".to_string(),
            ))
        }
        _ => {
            return Err(CareerError::Schema(
                "field 'title' must be a string".to_string(),
            ))
        }
    };

    let sections = match field(root, "sections") {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .enumerate()
            .map(|(index, value)| parse_section(value, index))
            .collect::<Result<Vec<_>, _>>()?,
        _ => {
            return Err(CareerError::Schema(
                "field 'sections' must be a sequence".to_string(),
            ))
        }
    };

    let contact = parse_contact(field(root, "contact"))?;

    let last_update = match field(root, "last_update") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => match scalar_text(other) {
            Some(text) => return Err(CareerError::DateFormat { value: text }),
            None => {
                return Err(CareerError::Schema(
                    "field 'last_update' must be a string".to_string(),
                ))
            }
        },
        None => return Err(CareerError::missing_field("last_update")),
    };

    let record = CareerRecord {
        id: derived_id.to_string(),
        title,
        last_update,
        sections,
        contact,
    };

    validate_date_format(&record.last_update)?;
    validate_value_policy(&record, policy)?;

    Ok(record)
}

fn parse_section(value: &Value, index: usize) -> Result<Section, CareerError> {
    let path = format!("sections[{index}]");
    let map = as_mapping(value, &path)?;

    let title = match field(map, "title") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) | None => return Err(CareerError::missing_field_at(&path, "title")),
        Some(_) => {
            return Err(CareerError::Schema(format!(
                "{path}: field 'title' must be a string"
            )))
        }
    };

    let items = match field(map, "items") {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .enumerate()
            .map(|(item_index, value)| parse_item(value, &format!("{path}.items[{item_index}]")))
            .collect::<Result<Vec<_>, _>>()?,
        None => return Err(CareerError::missing_field_at(&path, "items")),
        Some(_) => {
            return Err(CareerError::Schema(format!(
                "{path}: field 'items' must be a sequence"
            )))
        }
    };

    Ok(Section { title, items })
}

fn parse_item(value: &Value, path: &str) -> Result<Item, CareerError> {
    let map = as_mapping(value, path)?;

    let key = match field(map, "key") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) | None => return Err(CareerError::missing_field_at(path, "key")),
        Some(_) => {
            return Err(CareerError::Schema(format!(
                "{path}: field 'key' must be a string"
            )))
        }
    };

    let value = match field(map, "value") {
        Some(v) => project_value(v, path)?,
        None => return Err(CareerError::missing_field_at(path, "value")),
    };

    let must_have = match field(map, "must_have") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(CareerError::Schema(format!(
                "{path}: field 'must_have' must be a boolean"
            )))
        }
    };

    Ok(Item {
        key,
        value,
        must_have,
    })
}

/// Maps a YAML node onto exactly one `ItemValue` variant. No coercion: a
/// sequence holding a number is rejected rather than stringified.
fn project_value(value: &Value, path: &str) -> Result<ItemValue, CareerError> {
    match value {
        Value::Bool(b) => Ok(ItemValue::Boolean(*b)),
        Value::String(s) => Ok(ItemValue::Text(s.clone())),
        Value::Number(n) => to_json_number(n).map(ItemValue::Number).ok_or_else(|| {
            CareerError::Schema(format!("{path}: field 'value' must be a finite number"))
        }),
        Value::Sequence(seq) => seq
            .iter()
            .map(|element| match untag(element) {
                Value::String(s) => Ok(s.clone()),
                _ => Err(CareerError::Schema(format!(
                    "{path}: field 'value' must be a sequence of strings"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ItemValue::List),
        _ => Err(CareerError::Schema(format!(
            "{path}: field 'value' must be a string, boolean, number, or sequence of strings"
        ))),
    }
}

fn parse_contact(value: Option<&Value>) -> Result<Option<Contact>, CareerError> {
    let map = match value {
        None => return Ok(None),
        Some(Value::Mapping(map)) => map,
        Some(_) => {
            return Err(CareerError::Schema(
                "field 'contact' must be a mapping".to_string(),
            ))
        }
    };

    let handle = |name: &str| match field(map, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CareerError::Schema(format!(
            "contact: field '{name}' must be a string"
        ))),
    };

    let contact = Contact {
        email: handle("email")?,
        twitter: handle("twitter")?,
        linkedin: handle("linkedin")?,
        github: handle("github")?,
    };

    Ok((!contact.is_empty()).then_some(contact))
}

fn field<'a>(map: &'a Mapping, name: &str) -> Option<&'a Value> {
    map.get(name).map(untag).filter(|v| !v.is_null())
}

fn as_mapping<'a>(value: &'a Value, path: &str) -> Result<&'a Mapping, CareerError> {
    match untag(value) {
        Value::Mapping(map) => Ok(map),
        _ => Err(CareerError::Schema(format!("{path}: must be a mapping"))),
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn to_json_number(n: &serde_yaml::Number) -> Option<serde_json::Number> {
    if let Some(i) = n.as_i64() {
        Some(i.into())
    } else if let Some(u) = n.as_u64() {
        Some(u.into())
    } else {
        n.as_f64().and_then(serde_json::Number::from_f64)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
