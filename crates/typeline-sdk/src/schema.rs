//! Schema documents
//!
//! A schema maps field names to descriptor strings. Field names are field
//! paths, so `user.email` describes a nested value. Two document shapes are
//! accepted, written in YAML or JSON:
//!
//! ```yaml
//! name: signup
//! fields:
//!   email: string(/^[^@]+@[^@]+$/)
//!   age: number(0,150)?
//!   guardian: 'when age<18 *? string : string?'
//! ```
//!
//! or the flat mapping of the `fields` section alone. Field order follows
//! the document.

use crate::error::{Result, SdkError};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use thiserror::Error;
use typeline_core::{Descriptor, FieldPath};
use typeline_parser::{ConditionalParser, GrammarError};

/// Schema document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    /// Format for a file: JSON for `.json`, YAML otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SchemaFormat::Json,
            _ => SchemaFormat::Yaml,
        }
    }
}

/// One declared field
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Name as written in the document
    pub name: String,
    /// Parsed form of the name
    pub path: FieldPath,
    /// Descriptor text as written in the document
    pub source: String,
    pub descriptor: Descriptor,
}

impl SchemaField {
    /// Parse a field's descriptor text
    pub fn parse(name: &str, source: &str, parser: &ConditionalParser) -> Result<Self> {
        if !FieldPath::is_valid_syntax(name) {
            return Err(SdkError::InvalidSchema(format!(
                "field name '{}' {}",
                name,
                FieldProblem::InvalidName
            )));
        }
        let descriptor = parser.parse(source).map_err(|source| SdkError::FieldGrammar {
            field: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            path: FieldPath::parse(name),
            source: source.to_string(),
            descriptor,
        })
    }
}

/// Why a schema field cannot be loaded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldProblem {
    /// The field name is not a field path
    #[error("is not a valid field path")]
    InvalidName,

    /// The descriptor does not parse
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Field that would fail to load, found while checking a schema document
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDiagnostic {
    pub field: String,
    pub source: String,
    pub error: FieldProblem,
}

/// Ordered set of field descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    name: Option<String>,
    fields: Vec<SchemaField>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Look up a field by its name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Add a field. A field with the same name is replaced in place.
    pub fn insert(&mut self, field: SchemaField) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Add every field of `other`, keeping this schema's name if set
    pub fn extend(&mut self, other: Schema) {
        if self.name.is_none() {
            self.name = other.name;
        }
        for field in other.fields {
            self.insert(field);
        }
    }

    /// Top-level payload keys the schema declares
    pub fn root_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.fields.iter().filter_map(|field| field.path.root_key()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Parse a schema document. Fails on the first field with a grammar error.
    pub fn parse_str(text: &str, format: SchemaFormat, parser: &ConditionalParser) -> Result<Self> {
        let document = SchemaDocument::read(text, format)?;
        let mut schema = Schema {
            name: document.name,
            fields: Vec::with_capacity(document.entries.len()),
        };
        for (name, source) in &document.entries {
            schema.insert(SchemaField::parse(name, source, parser)?);
        }
        Ok(schema)
    }

    /// Read and parse a schema file
    pub fn from_file(path: impl AsRef<Path>, parser: &ConditionalParser) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text, SchemaFormat::from_path(path), parser)
    }

    /// Every field that [`Schema::parse_str`] would reject, in document
    /// order: bad field names and descriptors that do not parse. Only a
    /// malformed document is an `Err`.
    pub fn diagnose(
        text: &str,
        format: SchemaFormat,
        parser: &ConditionalParser,
    ) -> Result<Vec<FieldDiagnostic>> {
        let document = SchemaDocument::read(text, format)?;
        Ok(document
            .entries
            .into_iter()
            .filter_map(|(field, source)| {
                let error = if !FieldPath::is_valid_syntax(&field) {
                    FieldProblem::InvalidName
                } else {
                    FieldProblem::Grammar(parser.parse(&source).err()?)
                };
                Some(FieldDiagnostic {
                    field,
                    source,
                    error,
                })
            })
            .collect())
    }
}

/// Raw document: optional name plus `(field, descriptor text)` pairs
struct SchemaDocument {
    name: Option<String>,
    entries: Vec<(String, String)>,
}

impl SchemaDocument {
    fn read(text: &str, format: SchemaFormat) -> Result<Self> {
        let root: JsonValue = match format {
            SchemaFormat::Yaml => serde_yaml::from_str(text)?,
            SchemaFormat::Json => serde_json::from_str(text)?,
        };
        let JsonValue::Object(mut root) = root else {
            return Err(SdkError::InvalidSchema(
                "schema document must be a mapping".to_string(),
            ));
        };

        let wrapped = matches!(root.get("fields"), Some(JsonValue::Object(_)));
        let (name, fields) = if wrapped {
            let name = match root.get("name") {
                None | Some(JsonValue::Null) => None,
                Some(JsonValue::String(name)) => Some(name.clone()),
                Some(_) => {
                    return Err(SdkError::InvalidSchema(
                        "schema name must be a string".to_string(),
                    ))
                }
            };
            match root.remove("fields") {
                Some(JsonValue::Object(fields)) => (name, fields),
                _ => (name, Map::new()),
            }
        } else {
            (None, root)
        };

        let mut entries = Vec::with_capacity(fields.len());
        for (field, value) in fields {
            match value {
                JsonValue::String(source) => entries.push((field, source)),
                other => {
                    return Err(SdkError::InvalidSchema(format!(
                        "field '{}' must be a type string, got {}",
                        field,
                        json_kind(&other)
                    )))
                }
            }
        }
        Ok(Self { name, entries })
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
