//! Plutus language version of a compiled validator.

use std::fmt;

/// Target binary-format version of a compiled script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PlutusVersion {
    V1,
    V2,
    #[default]
    V3,
}

impl PlutusVersion {
    /// Every version, oldest first.
    pub const ALL: [Self; 3] = [Self::V1, Self::V2, Self::V3];

    /// Lenient parse as found in build artifacts: `"v2"`, `"V2"`, `"PlutusV2"`,
    /// `"plutus_v2"` and `"2"` all map to `V2`. Anything unrecognised
    /// (including the empty string) falls back to `V3`, the current default
    /// of the build toolchain.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized = raw.to_ascii_uppercase().replace("PLUTUS", "").replace('_', "");
        match normalized.trim() {
            "V1" | "1" => Self::V1,
            "V2" | "2" => Self::V2,
            _ => Self::V3,
        }
    }

    /// Short lowercase label (`"v1"`, `"v2"`, `"v3"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl fmt::Display for PlutusVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
