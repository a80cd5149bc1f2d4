// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Column namespacing.

Every region of a column is named `baseName + suffix`. Base names are fixed
per [`ColumnRole`] and none is a prefix of another, so two columns collide
exactly when their suffixes are equal. That rule lives here and nowhere else.
*/

use std::fmt;

use serde::{Serialize, Serializer};

/// Logical role of a region inside one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ColumnRole {
    /// Optional adapter for external (basal) input
    ExternalInput,
    /// Adapter for the sensor signal; also emits the reset pulse
    SensorInput,
    /// First layer, takes basal and apical input
    L4Column,
    /// Sequence memory driven by the sensor signal only
    TmColumn,
    /// Pooling layer, feeds back into L4
    L2Column,
}

impl ColumnRole {
    /// All roles in creation order
    pub const ALL: [ColumnRole; 5] = [
        ColumnRole::ExternalInput,
        ColumnRole::SensorInput,
        ColumnRole::L4Column,
        ColumnRole::TmColumn,
        ColumnRole::L2Column,
    ];

    pub fn base_name(self) -> &'static str {
        match self {
            ColumnRole::ExternalInput => "externalInput",
            ColumnRole::SensorInput => "sensorInput",
            ColumnRole::L4Column => "L4Column",
            ColumnRole::TmColumn => "TMColumn",
            ColumnRole::L2Column => "L2Column",
        }
    }

    /// Roles whose region may legitimately be left out of a column
    pub fn is_optional(self) -> bool {
        matches!(self, ColumnRole::ExternalInput)
    }

    pub fn is_input_adapter(self) -> bool {
        matches!(self, ColumnRole::ExternalInput | ColumnRole::SensorInput)
    }

    /// Reverse lookup from a base name
    pub fn from_base_name(base: &str) -> Option<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .find(|role| role.base_name() == base)
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

/// Suffix shared by every region of one column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ColumnNamespace {
    suffix: String,
}

impl ColumnNamespace {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Namespace `_{index}` used when composing several columns
    pub fn indexed(index: usize) -> Self {
        Self::new(format!("_{}", index))
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn qualify(&self, role: ColumnRole) -> QualifiedName {
        QualifiedName {
            role,
            suffix: self.suffix.clone(),
            qualified: format!("{}{}", role.base_name(), self.suffix),
        }
    }

    /// Resolve a region name to its role if it belongs to this column
    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        name.strip_suffix(self.suffix.as_str())
            .and_then(ColumnRole::from_base_name)
    }

    pub fn owns(&self, name: &str) -> bool {
        self.role_of(name).is_some()
    }

    /// Whether building both columns into one engine would produce a name clash
    pub fn conflicts_with(&self, other: &ColumnNamespace) -> bool {
        self.suffix == other.suffix
    }
}

impl fmt::Display for ColumnNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suffix.is_empty() {
            write!(f, "<unsuffixed>")
        } else {
            f.write_str(&self.suffix)
        }
    }
}

/// Fully qualified region name: `(role, suffix) -> baseName + suffix`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    role: ColumnRole,
    suffix: String,
    qualified: String,
}

impl QualifiedName {
    pub fn role(&self) -> ColumnRole {
        self.role
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn as_str(&self) -> &str {
        &self.qualified
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.qualified
    }
}

impl PartialEq<str> for QualifiedName {
    fn eq(&self, other: &str) -> bool {
        self.qualified == other
    }
}

impl PartialEq<&str> for QualifiedName {
    fn eq(&self, other: &&str) -> bool {
        self.qualified == *other
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.qualified)
    }
}
