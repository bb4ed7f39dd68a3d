//! YAML component spec loading.

use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// Marker in a spec's `demo` field that receives the rendered template.
pub const PLACEHOLDER: &str = "{}";

/// A component spec as described by a `.yml` file.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ComponentSpec {
    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Markdown description
    #[serde(default)]
    pub description: Option<String>,

    /// Markdown implementation notes
    #[serde(default)]
    pub implementation: Option<String>,

    /// Locals passed to the component template
    #[serde(default, deserialize_with = "nullable_mapping")]
    pub data: Mapping,

    /// Demo wrapper markup containing [`PLACEHOLDER`]
    #[serde(default)]
    pub demo: Option<String>,
}

fn nullable_mapping<'de, D>(deserializer: D) -> Result<Mapping, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default())
}

impl ComponentSpec {
    /// Parse a spec from raw file content.
    ///
    /// Mappings are read field by field. A sequence has no fields and
    /// yields the default spec. Scalars and empty documents are rejected.
    pub fn from_slice(content: &[u8]) -> Result<Self, SpecError> {
        match untag(parse(content)?) {
            value @ Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|e| SpecError::InvalidSpec(e.to_string()))
            }
            Value::Sequence(_) => Ok(Self::default()),
            other => Err(SpecError::NotAMapping(kind(&other))),
        }
    }

    /// Whether the spec sets none of its fields.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Template locals: the spec's `data` plus `baseUri`.
    pub fn locals(&self, base_uri: &str) -> Mapping {
        let mut locals = self.data.clone();
        locals.insert(
            Value::String("baseUri".to_string()),
            Value::String(base_uri.to_string()),
        );
        locals
    }

    /// Substitute rendered markup into every placeholder of the demo wrapper.
    pub fn demo_markup(&self, markup: &str) -> String {
        self.demo
            .as_deref()
            .unwrap_or(PLACEHOLDER)
            .replace(PLACEHOLDER, markup)
    }
}

/// The part of a spec file that navigation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutline {
    /// `title` field, when it is a string
    pub title: Option<String>,
}

/// Read the navigation outline of spec content.
///
/// Returns `None` when the content is not a structured value.
pub fn outline(content: &[u8]) -> Result<Option<SpecOutline>, SpecError> {
    let value = untag(parse(content)?);

    let outline = match &value {
        Value::Mapping(mapping) => Some(SpecOutline {
            title: mapping
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        Value::Sequence(_) => Some(SpecOutline { title: None }),
        _ => None,
    };

    Ok(outline)
}

/// Check whether spec content parses to a structured YAML value.
///
/// Mappings and sequences count as content; null and scalars do not.
pub fn has_content(content: &[u8]) -> Result<bool, SpecError> {
    Ok(outline(content)?.is_some())
}

fn parse(content: &[u8]) -> Result<Value, SpecError> {
    serde_yaml::from_slice(content).map_err(|e| SpecError::InvalidYaml(e.to_string()))
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Errors that can occur when loading a spec.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Spec must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("Invalid spec: {0}")]
    InvalidSpec(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_spec() {
        let source = r#"
title: Button
description: A *clickable* button
implementation: Use `.btn`
data:
  label: Save
  variant: primary
demo: <div class="demo">{}</div>
"#;

        let spec = ComponentSpec::from_slice(source.as_bytes()).unwrap();

        assert_eq!(spec.title.as_deref(), Some("Button"));
        assert_eq!(spec.description.as_deref(), Some("A *clickable* button"));
        assert_eq!(spec.implementation.as_deref(), Some("Use `.btn`"));
        assert_eq!(
            spec.data.get("label"),
            Some(&Value::String("Save".to_string()))
        );
        assert_eq!(spec.demo.as_deref(), Some("<div class=\"demo\">{}</div>"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let spec = ComponentSpec::from_slice(b"title: Bare").unwrap();

        assert!(spec.description.is_none());
        assert!(spec.implementation.is_none());
        assert!(spec.data.is_empty());
        assert!(spec.demo.is_none());
    }

    #[test]
    fn null_data_is_empty() {
        let spec = ComponentSpec::from_slice(b"title: Empty\ndata:\n").unwrap();

        assert!(spec.data.is_empty());
    }

    #[test]
    fn rejects_scalar_documents() {
        assert!(matches!(
            ComponentSpec::from_slice(b"42"),
            Err(SpecError::NotAMapping("number"))
        ));
        assert!(matches!(
            ComponentSpec::from_slice(b"null"),
            Err(SpecError::NotAMapping("null"))
        ));
    }

    #[test]
    fn sequences_yield_the_default_spec() {
        let spec = ComponentSpec::from_slice(b"- a\n- b").unwrap();

        assert_eq!(spec, ComponentSpec::default());
        assert!(spec.is_empty());
        assert!(!ComponentSpec::from_slice(b"title: Set").unwrap().is_empty());
    }

    #[test]
    fn tagged_documents_are_judged_by_their_value() {
        assert!(has_content(b"!component {title: Tagged}").unwrap());
        assert!(has_content(b"!list [a, b]").unwrap());
        assert!(!has_content(b"!count 3").unwrap());

        let spec = ComponentSpec::from_slice(b"!component {title: Tagged}").unwrap();
        assert_eq!(spec.title.as_deref(), Some("Tagged"));

        assert!(matches!(
            ComponentSpec::from_slice(b"!count 3"),
            Err(SpecError::NotAMapping("number"))
        ));
    }

    #[test]
    fn rejects_invalid_yaml() {
        let result = ComponentSpec::from_slice(b"title: [unclosed");

        assert!(matches!(result, Err(SpecError::InvalidYaml(_))));
    }

    #[test]
    fn locals_include_base_uri() {
        let spec = ComponentSpec::from_slice(b"data:\n  label: Go").unwrap();
        let locals = spec.locals("/assets/");

        assert_eq!(
            locals.get("baseUri"),
            Some(&Value::String("/assets/".to_string()))
        );
        assert_eq!(locals.get("label"), Some(&Value::String("Go".to_string())));
        assert!(spec.data.get("baseUri").is_none());
    }

    #[test]
    fn demo_replaces_every_placeholder() {
        let spec = ComponentSpec {
            demo: Some("<div>{}</div><div>{}</div>".to_string()),
            ..Default::default()
        };

        assert_eq!(spec.demo_markup("X"), "<div>X</div><div>X</div>");
    }

    #[test]
    fn demo_defaults_to_bare_markup() {
        let spec = ComponentSpec::default();

        assert_eq!(spec.demo_markup("<b>hi</b>"), "<b>hi</b>");
    }

    #[test]
    fn has_content_distinguishes_structures() {
        assert!(has_content(b"title: Button").unwrap());
        assert!(has_content(b"- one\n- two").unwrap());
        assert!(!has_content(b"null").unwrap());
        assert!(!has_content(b"42").unwrap());
        assert!(!has_content(b"just a string").unwrap());
        assert!(has_content(b"title: [oops").is_err());
    }

    #[test]
    fn outline_reads_title() {
        let card = outline(b"title: Card\ndata: {}").unwrap().unwrap();
        assert_eq!(card.title.as_deref(), Some("Card"));

        let untitled = outline(b"title: 7").unwrap().unwrap();
        assert_eq!(untitled.title, None);

        assert_eq!(outline(b"~").unwrap(), None);
    }
}
