//! The verification metadata payload and the compiler-family discriminant.

use std::fmt;

/// Compiler family that produced the verified scripts.
///
/// Carried on the wire as the constructor alternative of the metadata value.
/// Discriminants are part of the protocol and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CompilerType {
    #[default]
    Aiken,
    Helios,
    Scalus,
    OpShin,
    Plutarch,
    Plinth,
    Plutus,
    Pluts,
}

impl CompilerType {
    /// Every compiler family, in discriminant order.
    pub const ALL: [Self; 8] = [
        Self::Aiken,
        Self::Helios,
        Self::Scalus,
        Self::OpShin,
        Self::Plutarch,
        Self::Plinth,
        Self::Plutus,
        Self::Pluts,
    ];

    /// Constructor alternative used on the wire.
    #[must_use]
    pub const fn id(self) -> u64 {
        match self {
            Self::Aiken => 0,
            Self::Helios => 1,
            Self::Scalus => 2,
            Self::OpShin => 3,
            Self::Plutarch => 4,
            Self::Plinth => 5,
            Self::Plutus => 6,
            Self::Pluts => 7,
        }
    }

    /// Inverse of [`CompilerType::id`].
    #[must_use]
    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aiken => "aiken",
            Self::Helios => "helios",
            Self::Scalus => "scalus",
            Self::OpShin => "opshin",
            Self::Plutarch => "plutarch",
            Self::Plinth => "plinth",
            Self::Plutus => "plutus",
            Self::Pluts => "pluts",
        }
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for CompilerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters registered for one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEntry {
    /// Script hash as hex (56 characters once validated by the encoder).
    pub script_hash: String,
    /// Already-canonical CBOR parameter values as hex, in application order.
    pub values: Vec<String>,
}

/// Verification metadata for one submission.
///
/// Built once, then encoded and chunked; never mutated after encoding.
/// `parameters` is kept in insertion order here; the encoder imposes the
/// canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationMetadata {
    pub compiler: CompilerType,
    pub source_url: String,
    /// Commit reference as hex.
    pub commit: String,
    pub source_path: Option<String>,
    pub compiler_version: String,
    pub parameters: Vec<ParameterEntry>,
}

impl VerificationMetadata {
    /// Metadata for an Aiken build with no source path and no parameters.
    #[must_use]
    pub fn new(source_url: &str, commit: &str, compiler_version: &str) -> Self {
        Self {
            compiler: CompilerType::Aiken,
            source_url: source_url.to_string(),
            commit: commit.to_string(),
            source_path: None,
            compiler_version: compiler_version.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Set the path of the project within the repository.
    #[must_use]
    pub fn with_source_path(mut self, path: &str) -> Self {
        self.source_path = Some(path.to_string());
        self
    }

    /// Set the compiler family.
    #[must_use]
    pub fn with_compiler(mut self, compiler: CompilerType) -> Self {
        self.compiler = compiler;
        self
    }

    /// Append a parameter entry.
    #[must_use]
    pub fn with_parameters(mut self, script_hash: &str, values: &[&str]) -> Self {
        self.parameters.push(ParameterEntry {
            script_hash: script_hash.to_string(),
            values: values.iter().map(ToString::to_string).collect(),
        });
        self
    }
}
