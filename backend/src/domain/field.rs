//! Recognition fields (award categories).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown field string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recognition field: {value}")]
pub struct FieldParseError {
    /// The rejected input.
    pub value: String,
}

/// Category of recognition a nomination or honour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecognitionField {
    /// Service in parliament or public institutions.
    ParliamentaryAndPublicService,
    /// Military service.
    Military,
    /// Diplomatic service.
    Diplomatic,
    /// Contributions from the private sector.
    PrivateSector,
}

impl RecognitionField {
    /// All fields, in display order.
    pub const ALL: [Self; 4] = [
        Self::ParliamentaryAndPublicService,
        Self::Military,
        Self::Diplomatic,
        Self::PrivateSector,
    ];

    /// Wire representation, as stored and exchanged with clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParliamentaryAndPublicService => "Parliamentary and Public Service",
            Self::Military => "Military",
            Self::Diplomatic => "Diplomatic",
            Self::PrivateSector => "Private Sector",
        }
    }
}

impl fmt::Display for RecognitionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecognitionField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parliamentary and Public Service" => Ok(Self::ParliamentaryAndPublicService),
            "Military" => Ok(Self::Military),
            "Diplomatic" => Ok(Self::Diplomatic),
            "Private Sector" => Ok(Self::PrivateSector),
            other => Err(FieldParseError {
                value: other.to_owned(),
            }),
        }
    }
}

impl From<RecognitionField> for String {
    fn from(value: RecognitionField) -> Self {
        value.as_str().to_owned()
    }
}

impl TryFrom<String> for RecognitionField {
    type Error = FieldParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
