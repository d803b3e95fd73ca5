//! Output fields and writers that persist a classified address.

use std::collections::BTreeMap;
use std::fmt;

use crate::classifier::ParsedAddress;

/// The seven address fields surfaced to the host form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostField {
    /// Building number
    BuildingNumber,
    /// Street line 1
    Street1,
    /// Street line 2
    Street2,
    /// City
    City,
    /// County
    County,
    /// State
    State,
    /// Zip
    Zip,
}

impl HostField {
    /// Every field, in display order.
    pub const ALL: [HostField; 7] = [
        HostField::BuildingNumber,
        HostField::Street1,
        HostField::Street2,
        HostField::City,
        HostField::County,
        HostField::State,
        HostField::Zip,
    ];

    /// Human-readable field name.
    pub fn label(&self) -> &'static str {
        match self {
            HostField::BuildingNumber => "building number",
            HostField::Street1 => "street line 1",
            HostField::Street2 => "street line 2",
            HostField::City => "city",
            HostField::County => "county",
            HostField::State => "state",
            HostField::Zip => "zip",
        }
    }

    /// Default alias of the matching capture-form field.
    pub fn alias(&self) -> &'static str {
        match self {
            HostField::BuildingNumber => "singleBldg",
            HostField::Street1 => "st1",
            HostField::Street2 => "st2",
            HostField::City => "city",
            HostField::County => "county",
            HostField::State => "state",
            HostField::Zip => "zip",
        }
    }
}

impl fmt::Display for HostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination for a classified address.
///
/// Writing is the host's responsibility and is assumed to succeed.
pub trait FieldWriter {
    /// Store every field of `address`.
    fn write(&mut self, address: &ParsedAddress);
}

/// In-memory writer keyed by form-field alias.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    aliases: BTreeMap<HostField, String>,
    values: BTreeMap<String, String>,
}

impl FieldMap {
    /// Create an empty map using the default aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `field` under a custom alias.
    ///
    /// Aliases are not checked for uniqueness. If two fields share an alias,
    /// the one later in [`HostField::ALL`] wins on every [`write`](FieldWriter::write).
    pub fn with_alias(mut self, field: HostField, alias: impl Into<String>) -> Self {
        self.aliases.insert(field, alias.into());
        self
    }

    /// Alias used for `field`.
    pub fn alias(&self, field: HostField) -> &str {
        self.aliases
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.alias())
    }

    /// Value last written under `alias`.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.values.get(alias).map(String::as_str)
    }

    /// Value last written for `field`.
    pub fn field(&self, field: HostField) -> Option<&str> {
        self.get(self.alias(field))
    }

    /// All written values keyed by alias.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl FieldWriter for FieldMap {
    fn write(&mut self, address: &ParsedAddress) {
        for (field, value) in address.fields() {
            let alias = self.alias(field).to_string();
            self.values.insert(alias, value.to_string());
        }
    }
}
