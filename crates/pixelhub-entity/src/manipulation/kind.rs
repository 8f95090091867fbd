//! Manipulation type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of operation a manipulation record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "manipulation_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ManipulationType {
    /// Resize to explicit or percentage dimensions.
    Resize,
}

impl ManipulationType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resize => "resize",
        }
    }
}

impl fmt::Display for ManipulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ManipulationType {
    type Err = pixelhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resize" => Ok(Self::Resize),
            _ => Err(pixelhub_core::AppError::validation(format!(
                "Invalid manipulation type: '{s}'. Expected: resize"
            ))),
        }
    }
}
