//! Ledger record model and its transport encoding
//!
//! An entry travels as
//!
//! ```text
//! { "Name": "Rolex", "WeightMil": 150, "Colour": { "Black": null }, "Year": 2020 }
//! ```
//!
//! The colour is a tagged variant: a single-key map whose key names the
//! colour and whose value is a unit placeholder.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// The fixed set of colours a ledger entry may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    Red,
    Green,
    Blue,
    Yellow,
    Black,
    White,
}

impl Colour {
    /// Every colour, in presentation order
    pub const ALL: [Colour; 6] = [
        Colour::Red,
        Colour::Green,
        Colour::Blue,
        Colour::Yellow,
        Colour::Black,
        Colour::White,
    ];

    /// Labels indexed by discriminant, in the order of [`Colour::ALL`]
    const LABELS: &'static [&'static str] = &["Red", "Green", "Blue", "Yellow", "Black", "White"];

    /// Plain label shown to users and used as the variant key on the wire
    pub fn label(&self) -> &'static str {
        Self::LABELS[*self as usize]
    }

    /// Value submitted by the add-item colour selector
    pub fn select_value(&self) -> String {
        format!("#{}", self.label())
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Colour {
    type Err = CoreError;

    /// Accepts a plain label (`Black`) or a selector value (`#Black`)
    fn from_str(s: &str) -> Result<Self> {
        let label = s.strip_prefix('#').unwrap_or(s);
        Colour::ALL
            .into_iter()
            .find(|colour| colour.label() == label)
            .ok_or_else(|| CoreError::InvalidColour(s.to_string()))
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.label(), &())?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct VariantVisitor;

        impl<'de> Visitor<'de> for VariantVisitor {
            type Value = Colour;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a single-key map naming a colour")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Colour, A::Error> {
                let name: String = map
                    .next_key()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                map.next_value::<IgnoredAny>()?;

                if map.next_key::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }

                name.parse()
                    .map_err(|_| de::Error::unknown_variant(&name, Colour::LABELS))
            }
        }

        deserializer.deserialize_map(VariantVisitor)
    }
}

/// A ledger record, keyed externally by its barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entry {
    /// Item name
    pub name: String,

    /// Weight in milligrams
    pub weight_mil: u64,

    /// Item colour
    pub colour: Colour,

    /// Year of manufacture
    pub year: u64,
}

impl Entry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, weight_mil: u64, colour: Colour, year: u64) -> Self {
        Self {
            name: name.into(),
            weight_mil,
            colour,
            year,
        }
    }

    /// Encode to the ledger's JSON transport shape
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from the ledger's JSON transport shape
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Why the ledger refused an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertRejection {
    /// An entry already exists under this barcode
    DuplicateKey,
    /// The barcode signature did not verify against the operator key
    InvalidSignature,
}

/// Ledger reply to an insert: `{"ok": null}` or `{"err": "DuplicateKey"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertReply {
    Ok(()),
    Err(InsertRejection),
}
