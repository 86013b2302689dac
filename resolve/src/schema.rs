//! Parameter schema model.
//!
//! Blueprint parameter schemas arrive as loosely-shaped JSON. They are read
//! once into the closed [`SchemaType`] union so that classification is a total
//! match instead of ad hoc field probing.
//!
//! # Shapes
//!
//! | JSON                                    | `SchemaType`                  |
//! |-----------------------------------------|-------------------------------|
//! | `{"dataType": "integer"}` (any scalar)  | `Primitive("integer")`        |
//! | `{"$ref": "#/definitions/..."}`         | `Reference(path)`             |
//! | `{"dataType": "list", "items": T}`      | `ListOf(T)`                   |
//! | `{"dataType": "map", "keys": K, ...}`   | `MapOf(K, V)`                 |
//! | `{"dataType": "constructor", ...}`      | `SumOf([alt])`                |
//! | `{"anyOf": [...]}`                      | `SumOf(alts)`                 |
//! | `{}` or anything unrecognised           | `Any`                         |
//!
//! `dataType` wins over structural keys, then `$ref`, then `items`,
//! `keys`/`values`, `anyOf`.

use std::fmt;

use serde_json::Value;

/// Prefix of blueprint definition references.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// One constructor of a sum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    pub title: Option<String>,
    pub index: u64,
    pub fields: Vec<SchemaType>,
}

/// Closed union of parameter type descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// A scalar named by `dataType` (`integer`, `bytes`, `#data`, ...).
    Primitive(String),
    /// A named reference into the blueprint's `definitions`.
    Reference(String),
    ListOf(Box<SchemaType>),
    MapOf(Box<SchemaType>, Box<SchemaType>),
    SumOf(Vec<Alternative>),
    /// No constraint: any Plutus data.
    Any,
}

impl SchemaType {
    /// Read a schema from blueprint JSON. Never fails: shapes it cannot
    /// recognise become [`SchemaType::Any`].
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::Any;
        };

        if let Some(data_type) = obj.get("dataType").and_then(Value::as_str) {
            return match data_type {
                "list" => Self::ListOf(Box::new(
                    obj.get("items").map_or(Self::Any, Self::from_json),
                )),
                "map" => Self::MapOf(
                    Box::new(obj.get("keys").map_or(Self::Any, Self::from_json)),
                    Box::new(obj.get("values").map_or(Self::Any, Self::from_json)),
                ),
                "constructor" => Self::SumOf(vec![Alternative::from_json(value)]),
                other => Self::Primitive(other.to_string()),
            };
        }
        if let Some(path) = obj.get("$ref").and_then(Value::as_str) {
            return Self::Reference(path.to_string());
        }
        if let Some(items) = obj.get("items") {
            return Self::ListOf(Box::new(Self::from_json(items)));
        }
        if let (Some(keys), Some(values)) = (obj.get("keys"), obj.get("values")) {
            return Self::MapOf(
                Box::new(Self::from_json(keys)),
                Box::new(Self::from_json(values)),
            );
        }
        if let Some(alts) = obj.get("anyOf").and_then(Value::as_array) {
            if !alts.is_empty() {
                return Self::SumOf(alts.iter().map(Alternative::from_json).collect());
            }
        }
        Self::Any
    }

    /// Short human-readable type name, as shown next to an input field.
    ///
    /// For references this is the final path segment of the reference name,
    /// which is also what classification keys on.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(name) => name.clone(),
            Self::Reference(path) => reference_name(path),
            Self::ListOf(item) => format!("List<{}>", item.type_name()),
            Self::MapOf(..) => "map (CBOR)".to_string(),
            Self::SumOf(alts) => alts
                .first()
                .and_then(|a| a.title.clone())
                .unwrap_or_else(|| "constructor (CBOR)".to_string()),
            Self::Any => "Data".to_string(),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl Alternative {
    fn from_json(value: &Value) -> Self {
        let title = value.get("title").and_then(Value::as_str).map(str::to_string);
        let index = value.get("index").and_then(Value::as_u64).unwrap_or(0);
        let fields = value
            .get("fields")
            .and_then(Value::as_array)
            .map(|fs| fs.iter().map(SchemaType::from_json).collect())
            .unwrap_or_default();
        Self {
            title,
            index,
            fields,
        }
    }
}

/// A declared parameter slot of a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    pub title: Option<String>,
    pub schema: SchemaType,
}

impl ParameterSchema {
    /// Read one entry of a validator's `parameters` array.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        Self {
            title: value.get("title").and_then(Value::as_str).map(str::to_string),
            schema: value.get("schema").map_or(SchemaType::Any, SchemaType::from_json),
        }
    }

    /// Title for display, falling back to `param{index}`.
    #[must_use]
    pub fn display_title(&self, index: usize) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("param{index}"))
    }
}

/// Definition key addressed by a `$ref`, with JSON-pointer escapes undone.
///
/// `#/definitions/cardano~1assets~1PolicyId` → `cardano/assets/PolicyId`.
#[must_use]
pub fn definition_key(path: &str) -> String {
    let raw = path.strip_prefix(DEFINITIONS_PREFIX).unwrap_or(path);
    raw.replace("~1", "/").replace("~0", "~")
}

/// Final segment of a reference after unescaping.
///
/// `#/definitions/cardano~1assets~1PolicyId` → `PolicyId`.
#[must_use]
pub fn reference_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    let unescaped = last.replace("~1", "/").replace("~0", "~");
    unescaped
        .rsplit('/')
        .next()
        .unwrap_or(unescaped.as_str())
        .to_string()
}
