//! Value transforms applied after a reference resolves.
//!
//! Named in a reference after a pipe: `<vault:secret/data/app#cert|b64enc>`.

use std::fmt;
use std::str::FromStr;

use base64::Engine;

use crate::error::SubstituteError;

/// A named post-processing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Standard base64 of the value's UTF-8 bytes.
    B64Enc,
}

impl Transform {
    /// All supported transforms, for hints and docs.
    pub const ALL: &'static [Transform] = &[Transform::B64Enc];

    /// Name as written in a reference.
    pub fn name(&self) -> &'static str {
        match self {
            Self::B64Enc => "b64enc",
        }
    }

    /// Apply the transform to a resolved value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::B64Enc => base64::engine::general_purpose::STANDARD.encode(value.as_bytes()),
        }
    }
}

impl FromStr for Transform {
    type Err = SubstituteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| SubstituteError::UnsupportedTransform(s.to_string()))
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
