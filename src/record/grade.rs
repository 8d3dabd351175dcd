use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::RecordError;

/// Grade level a student is enrolled in, from Nursery up to Matric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Nursery,
    Kg,
    Class1,
    Class2,
    Class3,
    Class4,
    Class5,
    Class6,
    Class7,
    Class8,
    Class9,
    Class10,
    Matric,
}

impl Grade {
    /// Every grade level in menu order
    pub const ALL: [Grade; 13] = [
        Grade::Nursery,
        Grade::Kg,
        Grade::Class1,
        Grade::Class2,
        Grade::Class3,
        Grade::Class4,
        Grade::Class5,
        Grade::Class6,
        Grade::Class7,
        Grade::Class8,
        Grade::Class9,
        Grade::Class10,
        Grade::Matric,
    ];

    /// Canonical name, as stored in the Class column
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Nursery => "Nursery",
            Grade::Kg => "KG",
            Grade::Class1 => "Class 1",
            Grade::Class2 => "Class 2",
            Grade::Class3 => "Class 3",
            Grade::Class4 => "Class 4",
            Grade::Class5 => "Class 5",
            Grade::Class6 => "Class 6",
            Grade::Class7 => "Class 7",
            Grade::Class8 => "Class 8",
            Grade::Class9 => "Class 9",
            Grade::Class10 => "Class 10",
            Grade::Matric => "Matric",
        }
    }

    /// Zero-based position in `Grade::ALL`
    pub fn position(&self) -> usize {
        Grade::ALL
            .iter()
            .position(|g| g == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = RecordError;

    /// Accepts the canonical names, ignoring ASCII case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RecordError::UnknownGrade(trimmed.to_string()))
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
