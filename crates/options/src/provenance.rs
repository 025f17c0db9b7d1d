//! Provenance tags ("added by") for product ↔ option associations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use productopts_core::DomainError;

use crate::OptionResult;

/// Why an option is attached to a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddedBy {
    /// Attached by hand in the back office.
    Manual,
    /// Inherited from one of the product's categories.
    Category,
    /// Inherited from the product's template.
    Template,
}

impl AddedBy {
    pub const ALL: [AddedBy; 3] = [AddedBy::Manual, AddedBy::Category, AddedBy::Template];

    pub fn as_str(self) -> &'static str {
        match self {
            AddedBy::Manual => "manual",
            AddedBy::Category => "category",
            AddedBy::Template => "template",
        }
    }
}

impl core::fmt::Display for AddedBy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for AddedBy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddedBy::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown provenance tag: {s}")))
    }
}

/// The set of tags carried by one association.
///
/// Stored as a JSON array of tag names (`["category","template"]`), always in
/// the same order so equal sets encode to equal bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvenanceSet(BTreeSet<AddedBy>);

impl ProvenanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(tag: AddedBy) -> Self {
        Self(BTreeSet::from([tag]))
    }

    pub fn contains(&self, tag: AddedBy) -> bool {
        self.0.contains(&tag)
    }

    /// Returns `false` when the tag was already present.
    pub fn insert(&mut self, tag: AddedBy) -> bool {
        self.0.insert(tag)
    }

    /// Returns `false` when the tag was not present.
    pub fn remove(&mut self, tag: AddedBy) -> bool {
        self.0.remove(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = AddedBy> + '_ {
        self.0.iter().copied()
    }

    /// Encode for storage.
    pub fn to_json(&self) -> OptionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored value.
    pub fn from_json(raw: &str) -> OptionResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl FromIterator<AddedBy> for ProvenanceSet {
    fn from_iter<I: IntoIterator<Item = AddedBy>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
