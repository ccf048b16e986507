//! Static wire↔form field tables.
//!
//! Each entity declares its editable fields as an enum implementing
//! [`FieldSchema`]. The same [`FieldSpec`] drives both directions, so a
//! remapped name (`image_url` on the wire, `imageUrl` in the form) can never
//! drift between load and submit.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::error::{FieldIssue, Problem, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Sent as-is, including the empty string.
    Text,
    /// Empty input is sent as `null`.
    OptionalText,
    Email,
    /// Never populated from the wire; sent only when non-empty.
    Secret,
    /// Integer reference to another record; empty selection is `null`.
    ForeignKey,
    /// One of a fixed list; empty selection is `null`.
    Choice(&'static [&'static str]),
    /// RFC 3339 date-time, forwarded in the caller's spelling.
    Timestamp,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub form: &'static str,
    pub wire: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown instead of an empty wire value when a record is loaded.
    pub load_default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(form: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self {
            form,
            wire,
            kind,
            required: false,
            load_default: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn load_default(mut self, value: &'static str) -> Self {
        self.load_default = Some(value);
        self
    }
}

/// Editable fields of one entity type.
pub trait FieldSchema: Copy + Ord + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn spec(self) -> FieldSpec;

    fn form_name(self) -> &'static str {
        self.spec().form
    }

    fn from_form_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.spec().form == name)
    }
}

/// Copies wire values into editable strings.
pub fn wire_to_form<F: FieldSchema>(wire: &Map<String, Value>) -> BTreeMap<F, String> {
    F::ALL
        .iter()
        .map(|field| {
            let spec = field.spec();
            let value = if spec.kind == FieldKind::Secret {
                String::new()
            } else {
                let text = wire.get(spec.wire).map(editable_text).unwrap_or_default();
                match spec.load_default {
                    Some(fallback) if text.trim().is_empty() => fallback.to_string(),
                    _ => text,
                }
            };
            (*field, value)
        })
        .collect()
}

/// Validates and coerces form strings into a wire payload.
pub fn form_to_wire<F: FieldSchema>(
    fields: &BTreeMap<F, String>,
) -> Result<Map<String, Value>, ValidationError> {
    form_to_wire_against(fields, &BTreeMap::new())
}

/// Like [`form_to_wire`], but a choice still holding the value it was loaded
/// with is sent back unchecked, even when the server's value is not one of
/// the listed options.
pub fn form_to_wire_against<F: FieldSchema>(
    fields: &BTreeMap<F, String>,
    loaded: &BTreeMap<F, String>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut payload = Map::new();
    let mut issues = Vec::new();

    for field in F::ALL {
        let spec = field.spec();
        let raw = fields.get(field).map_or("", String::as_str);
        let trimmed = raw.trim();

        if spec.required && trimmed.is_empty() {
            issues.push(FieldIssue {
                field: spec.form,
                problem: Problem::Missing,
            });
            continue;
        }

        let unchanged_choice = matches!(spec.kind, FieldKind::Choice(_))
            && !trimmed.is_empty()
            && loaded.get(field).is_some_and(|was| was.trim() == trimmed);
        if unchanged_choice {
            payload.insert(spec.wire.to_string(), Value::String(trimmed.to_string()));
            continue;
        }

        match coerce(spec.kind, raw) {
            Ok(Some(value)) => {
                payload.insert(spec.wire.to_string(), value);
            }
            Ok(None) => {}
            Err(problem) => issues.push(FieldIssue {
                field: spec.form,
                problem,
            }),
        }
    }

    if issues.is_empty() {
        Ok(payload)
    } else {
        Err(ValidationError { issues })
    }
}

/// `Ok(None)` leaves the key out of the payload entirely.
fn coerce(kind: FieldKind, raw: &str) -> Result<Option<Value>, Problem> {
    let trimmed = raw.trim();
    match kind {
        FieldKind::Text => Ok(Some(Value::String(raw.to_string()))),
        FieldKind::OptionalText => Ok(Some(non_empty(trimmed, || {
            Value::String(raw.to_string())
        }))),
        FieldKind::Email => {
            if trimmed.is_empty() {
                return Ok(Some(Value::Null));
            }
            let valid = trimmed
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if valid {
                Ok(Some(Value::String(trimmed.to_string())))
            } else {
                Err(Problem::NotAnEmail)
            }
        }
        FieldKind::Secret => {
            if raw.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Value::String(raw.to_string())))
            }
        }
        FieldKind::ForeignKey => {
            if trimmed.is_empty() {
                return Ok(Some(Value::Null));
            }
            trimmed
                .parse::<i64>()
                .map(|id| Some(Value::from(id)))
                .map_err(|_| Problem::NotANumber)
        }
        FieldKind::Choice(allowed) => {
            if trimmed.is_empty() {
                return Ok(Some(Value::Null));
            }
            if allowed.contains(&trimmed) {
                Ok(Some(Value::String(trimmed.to_string())))
            } else {
                Err(Problem::NotAChoice)
            }
        }
        FieldKind::Timestamp => {
            if trimmed.is_empty() {
                return Ok(Some(Value::Null));
            }
            OffsetDateTime::parse(trimmed, &Rfc3339)
                .map(|_| Some(Value::String(trimmed.to_string())))
                .map_err(|_| Problem::NotATimestamp)
        }
        FieldKind::Flag => match trimmed {
            "true" => Ok(Some(Value::Bool(true))),
            "false" | "" => Ok(Some(Value::Bool(false))),
            _ => Err(Problem::NotAFlag),
        },
    }
}

fn non_empty(trimmed: &str, value: impl FnOnce() -> Value) -> Value {
    if trimmed.is_empty() {
        Value::Null
    } else {
        value()
    }
}

fn editable_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
