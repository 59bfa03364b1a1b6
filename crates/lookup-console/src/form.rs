//! Add-item form state
//!
//! Holds the raw text the operator typed. Coercion into an [`Entry`]
//! happens at submit time.

use lookup_core::{Colour, Entry};
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Fields of the add-item form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Barcode,
    Name,
    Weight,
    Year,
    Colour,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "barcode" => Ok(FormField::Barcode),
            "name" => Ok(FormField::Name),
            "weight" => Ok(FormField::Weight),
            "year" => Ok(FormField::Year),
            "colour" | "color" => Ok(FormField::Colour),
            _ => Err(format!("Unknown form field: {}", s)),
        }
    }
}

/// Raw form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub barcode: String,
    pub name: String,
    /// Weight in milligrams, as typed
    pub weight: String,
    pub year: String,
    /// Selector value (`#Black`) or plain label
    pub colour: String,
}

impl ItemForm {
    /// Set one field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Barcode => self.barcode = value,
            FormField::Name => self.name = value,
            FormField::Weight => self.weight = value,
            FormField::Year => self.year = value,
            FormField::Colour => self.colour = value,
        }
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether every field is empty
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Colour selection, validated against the fixed set
    pub fn colour(&self) -> Result<Colour> {
        Ok(self.colour.trim().parse::<Colour>()?)
    }

    /// Coerce the form into an entry
    ///
    /// The colour is checked first, then the numeric fields.
    pub fn to_entry(&self) -> Result<Entry> {
        let colour = self.colour()?;
        let weight_mil = parse_number("weight", &self.weight)?;
        let year = parse_number("year", &self.year)?;
        Ok(Entry::new(self.name.trim(), weight_mil, colour, year))
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| ClientError::InvalidField {
        field,
        reason: format!("'{}' is not a whole number", raw),
    })
}
