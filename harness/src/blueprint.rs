//! Blueprint (`plutus.json`) reader.
//!
//! Turns a build artifact into [`Validator`]s. Entries that cannot be used
//! (missing fields, unparseable titles, bad hashes) are skipped with a
//! warning and listed in [`Blueprint::skipped`]; only structural problems with
//! the file itself are errors.
//!
//! # Title formats
//!
//! | Compiler version      | Title                  | Module       | Default Plutus |
//! |-----------------------|------------------------|--------------|----------------|
//! | `v1.0.x` (`-alpha`)   | `name.purpose`         | same as name | V2             |
//! | anything else / none  | `module.name.purpose`  | from title   | V3             |
//!
//! Entries sharing a hash are one validator (one compiled script with several
//! purposes) and are merged; the first entry's title names it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use attest_kernel::script::hash::ScriptHash;
use attest_kernel::script::version::PlutusVersion;
use attest_resolve::schema::{definition_key, ParameterSchema};
use attest_resolve::validator::{Validator, ValidatorId};
use serde_json::{Map, Value};

use crate::error::BlueprintError;

/// How validator titles are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFormat {
    /// `name.purpose` (compiler v1.0.x).
    NamePurpose,
    /// `module.name.purpose`.
    ModuleNamePurpose,
}

impl TitleFormat {
    /// Select the title format for a compiler version string.
    #[must_use]
    pub fn for_compiler_version(version: Option<&str>) -> Self {
        match version {
            Some(v) if is_v1_0(v) => Self::NamePurpose,
            _ => Self::ModuleNamePurpose,
        }
    }

    fn default_plutus_version(self) -> PlutusVersion {
        match self {
            Self::NamePurpose => PlutusVersion::V2,
            Self::ModuleNamePurpose => PlutusVersion::V3,
        }
    }

    /// Split a title into `(module, name, purpose)`.
    fn split(self, title: &str) -> Option<(String, String, String)> {
        let parts: Vec<&str> = title.split('.').collect();
        match (self, parts.as_slice()) {
            (Self::NamePurpose, [name, purpose, ..]) => {
                Some(((*name).to_string(), (*name).to_string(), (*purpose).to_string()))
            }
            (Self::ModuleNamePurpose, [module, name, purpose, ..]) => Some((
                (*module).to_string(),
                (*name).to_string(),
                (*purpose).to_string(),
            )),
            _ => None,
        }
    }
}

/// `1.0.<n>` optionally followed by `-alpha...`, ignoring case and any `v`.
fn is_v1_0(version: &str) -> bool {
    let normalized = version.to_ascii_lowercase().replace('v', "");
    let Some(rest) = normalized.strip_prefix("1.0.") else {
        return false;
    };
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let tail = &rest[digits..];
    digits > 0 && (tail.is_empty() || tail.starts_with("-alpha"))
}

/// A blueprint entry that was not loaded, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub title: String,
    pub reason: String,
}

/// A parsed blueprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub compiler_name: Option<String>,
    pub compiler_version: Option<String>,
    pub plutus_version: PlutusVersion,
    pub title_format: TitleFormat,
    /// Merged validators, ordered by id.
    pub validators: Vec<Validator>,
    pub definitions: Map<String, Value>,
    pub skipped: Vec<SkippedEntry>,
}

impl Blueprint {
    /// Read and parse a blueprint file.
    ///
    /// # Errors
    ///
    /// [`BlueprintError::Io`] if the file cannot be read, otherwise as
    /// [`Blueprint::parse`].
    pub fn read(path: &Path) -> Result<Self, BlueprintError> {
        let text = std::fs::read_to_string(path).map_err(|source| BlueprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse blueprint JSON.
    ///
    /// # Errors
    ///
    /// - [`BlueprintError::Json`] if the text is not JSON.
    /// - [`BlueprintError::MissingValidators`] if there is no `validators` array.
    pub fn parse(json: &str) -> Result<Self, BlueprintError> {
        let root: Value = serde_json::from_str(json)?;
        let preamble = root.get("preamble");
        let compiler = preamble.and_then(|p| p.get("compiler"));
        let compiler_name = str_field(compiler, "name");
        let compiler_version = str_field(compiler, "version");
        let title_format = TitleFormat::for_compiler_version(compiler_version.as_deref());
        let plutus_version = str_field(preamble, "plutusVersion").map_or_else(
            || title_format.default_plutus_version(),
            |v| PlutusVersion::parse_lenient(&v),
        );

        let entries = root
            .get("validators")
            .and_then(Value::as_array)
            .ok_or(BlueprintError::MissingValidators)?;

        let mut by_hash: BTreeMap<ScriptHash, Validator> = BTreeMap::new();
        let mut skipped = Vec::new();
        for entry in entries {
            match load_entry(entry, title_format, plutus_version) {
                Ok((validator, purpose)) => {
                    by_hash
                        .entry(validator.unparameterized_hash)
                        .or_insert(validator)
                        .purposes
                        .insert(purpose);
                }
                Err(skip) => {
                    tracing::warn!(title = %skip.title, reason = %skip.reason, "skipping blueprint entry");
                    skipped.push(skip);
                }
            }
        }

        let mut validators: Vec<Validator> = by_hash.into_values().collect();
        validators.sort_by(|a, b| a.id.cmp(&b.id));
        tracing::info!(
            validators = validators.len(),
            skipped = skipped.len(),
            plutus = %plutus_version,
            "loaded blueprint"
        );

        Ok(Self {
            compiler_name,
            compiler_version,
            plutus_version,
            title_format,
            validators,
            definitions: root
                .get("definitions")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            skipped,
        })
    }

    /// The definition a `$ref` path points at, if present.
    #[must_use]
    pub fn definition(&self, reference: &str) -> Option<&Value> {
        self.definitions.get(&definition_key(reference))
    }

    #[must_use]
    pub fn validator(&self, id: &ValidatorId) -> Option<&Validator> {
        self.validators.iter().find(|v| &v.id == id)
    }
}

fn str_field(value: Option<&Value>, key: &str) -> Option<String> {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn non_empty_str<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn load_entry(
    entry: &Value,
    format: TitleFormat,
    plutus_version: PlutusVersion,
) -> Result<(Validator, String), SkippedEntry> {
    let title = non_empty_str(entry, "title").unwrap_or_default().to_string();
    let skip = |reason: String| SkippedEntry {
        title: title.clone(),
        reason,
    };

    let (Some(hash), Some(code)) = (
        non_empty_str(entry, "hash"),
        non_empty_str(entry, "compiledCode"),
    ) else {
        return Err(skip("missing title, hash or compiledCode".into()));
    };
    if title.is_empty() {
        return Err(skip("missing title, hash or compiledCode".into()));
    }
    let Some((module, name, purpose)) = format.split(&title) else {
        return Err(skip(format!("title does not match {format:?}")));
    };
    let hash = ScriptHash::parse(hash).map_err(|e| skip(e.to_string()))?;
    let parameters = entry
        .get("parameters")
        .and_then(Value::as_array)
        .map(|ps| ps.iter().map(ParameterSchema::from_json).collect())
        .unwrap_or_default();

    Ok((
        Validator {
            id: ValidatorId::new(&module, &name),
            purposes: BTreeSet::new(),
            parameters,
            compiled_code: code.to_string(),
            plutus_version,
            unparameterized_hash: hash,
        },
        purpose,
    ))
}
