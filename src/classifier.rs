//! Mapping of geocoder component sequences onto fixed address fields.
//!
//! The provider returns a variable number of components whose order, not
//! their tags, determines what each one means. A [`Template`] is chosen from
//! the component count alone (plus the suffix marker on the last component
//! for eight and nine components) and then read positionally.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::AddressComponent;
use crate::writer::HostField;

use Slot::{At, Empty};

/// Smallest component count any template can be satisfied with.
pub const MIN_COMPONENTS: usize = 5;

/// Source of one output field within a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Read the value of the component at this position
    At(usize),
    /// Always the empty string
    Empty,
}

impl Slot {
    fn index(self) -> Option<usize> {
        match self {
            Slot::At(index) => Some(index),
            Slot::Empty => None,
        }
    }

    fn read(self, components: &[AddressComponent]) -> String {
        match self {
            Slot::At(index) => components[index].value.clone(),
            Slot::Empty => String::new(),
        }
    }
}

/// Fixed index-to-field assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    building_number: Slot,
    street1: Slot,
    street2: Slot,
    city: Slot,
    county: Slot,
    state: Slot,
    zip: Slot,
}

impl Template {
    /// Nine components ending in a postal-code suffix.
    pub const NINE_WITH_SUFFIX: Template = Template {
        name: "nine_with_suffix",
        building_number: At(0),
        street1: At(1),
        street2: Empty,
        city: At(3),
        county: At(4),
        state: At(5),
        zip: At(7),
    };

    /// Nine components led by a secondary street line.
    pub const NINE: Template = Template {
        name: "nine",
        building_number: At(1),
        street1: At(2),
        street2: At(0),
        city: At(3),
        county: At(5),
        state: At(6),
        zip: At(8),
    };

    /// Eight components ending in a postal-code suffix.
    pub const EIGHT_WITH_SUFFIX: Template = Template {
        name: "eight_with_suffix",
        building_number: At(0),
        street1: At(1),
        street2: Empty,
        city: At(2),
        county: At(3),
        state: At(4),
        zip: At(6),
    };

    /// Eight components with an extra locality level before the county.
    pub const EIGHT: Template = Template {
        name: "eight",
        building_number: At(0),
        street1: At(1),
        street2: Empty,
        city: At(2),
        county: At(4),
        state: At(5),
        zip: At(7),
    };

    /// Seven components; also the fallback for unrecognised counts.
    pub const SEVEN: Template = Template {
        name: "seven",
        building_number: At(0),
        street1: At(1),
        street2: Empty,
        city: At(2),
        county: At(3),
        state: At(4),
        zip: At(6),
    };

    /// Six components without a building number.
    pub const SIX: Template = Template {
        name: "six",
        building_number: Empty,
        street1: At(0),
        street2: Empty,
        city: At(1),
        county: At(2),
        state: At(3),
        zip: At(5),
    };

    /// Five components without a building number or county.
    pub const FIVE: Template = Template {
        name: "five",
        building_number: Empty,
        street1: At(0),
        street2: Empty,
        city: At(1),
        county: Empty,
        state: At(2),
        zip: At(4),
    };

    /// Pick the template for a component count.
    ///
    /// `suffix_marked` is only consulted for eight and nine components. Any
    /// other count outside five to nine falls back to [`Template::SEVEN`],
    /// which cannot be satisfied by fewer than seven components.
    pub fn select(count: usize, suffix_marked: bool) -> Template {
        match (count, suffix_marked) {
            (9, true) => Template::NINE_WITH_SUFFIX,
            (9, false) => Template::NINE,
            (8, true) => Template::EIGHT_WITH_SUFFIX,
            (8, false) => Template::EIGHT,
            (7, _) => Template::SEVEN,
            (6, _) => Template::SIX,
            (5, _) => Template::FIVE,
            _ => Template::SEVEN,
        }
    }

    /// Pick the template for a component sequence.
    pub fn for_components(components: &[AddressComponent]) -> Template {
        let suffix_marked = components
            .last()
            .is_some_and(AddressComponent::is_postal_code_suffix);
        Self::select(components.len(), suffix_marked)
    }

    /// Short identifier used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Slot feeding the given output field.
    pub fn slot(&self, field: HostField) -> Slot {
        match field {
            HostField::BuildingNumber => self.building_number,
            HostField::Street1 => self.street1,
            HostField::Street2 => self.street2,
            HostField::City => self.city,
            HostField::County => self.county,
            HostField::State => self.state,
            HostField::Zip => self.zip,
        }
    }

    /// Highest component index the template reads.
    pub fn max_index(&self) -> usize {
        HostField::ALL
            .iter()
            .filter_map(|&field| self.slot(field).index())
            .max()
            .unwrap_or(0)
    }

    /// Read the template against a component sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassificationError`] if any referenced index is past
    /// the end of `components`. No partial address is produced.
    pub fn apply(&self, components: &[AddressComponent]) -> Result<ParsedAddress> {
        let required_index = self.max_index();
        if required_index >= components.len() {
            return Err(Error::ClassificationError {
                required_index,
                actual_length: components.len(),
            });
        }

        Ok(ParsedAddress {
            building_number: self.building_number.read(components),
            street1: self.street1.read(components),
            street2: self.street2.read(components),
            city: self.city.read(components),
            county: self.county.read(components),
            state: self.state.read(components),
            zip: self.zip.read(components),
        })
    }
}

/// Classify an ordered component sequence into address fields.
///
/// # Errors
///
/// Returns [`Error::ClassificationError`] when the sequence is too short for
/// the selected template, which is always the case below [`MIN_COMPONENTS`].
///
/// # Example
///
/// ```rust
/// use geocode_fields::{AddressComponent, classify};
///
/// let components = vec![
///     AddressComponent::new("Main St", ["route"]),
///     AddressComponent::new("Springfield", ["locality"]),
///     AddressComponent::new("IL", ["administrative_area_level_1"]),
///     AddressComponent::new("United States", ["country"]),
///     AddressComponent::new("62701", ["postal_code"]),
/// ];
///
/// let parsed = classify(&components)?;
/// assert_eq!(parsed.city, "Springfield");
/// assert_eq!(parsed.county, "");
/// # Ok::<(), geocode_fields::Error>(())
/// ```
pub fn classify(components: &[AddressComponent]) -> Result<ParsedAddress> {
    let template = Template::for_components(components);
    tracing::debug!(
        count = components.len(),
        template = template.name(),
        "Selected address template"
    );
    template.apply(components)
}

/// Classify several component sequences, one result per input.
pub fn classify_batch(batches: &[Vec<AddressComponent>]) -> Vec<Result<ParsedAddress>> {
    batches.iter().map(|components| classify(components)).collect()
}

/// Classify several component sequences across threads.
///
/// Results are returned in input order.
#[cfg(feature = "parallel")]
pub fn classify_batch_parallel(batches: &[Vec<AddressComponent>]) -> Vec<Result<ParsedAddress>> {
    use rayon::prelude::*;

    batches
        .par_iter()
        .map(|components| classify(components))
        .collect()
}

/// Fixed postal-address record produced by classification.
///
/// Fields not supplied by the selected template are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Building (house) number
    pub building_number: String,
    /// Primary street line
    pub street1: String,
    /// Secondary street line (premise or subpremise)
    pub street2: String,
    /// City or locality
    pub city: String,
    /// County
    pub county: String,
    /// State
    pub state: String,
    /// Zip code
    pub zip: String,
}

impl ParsedAddress {
    /// Value of one output field.
    pub fn get(&self, field: HostField) -> &str {
        match field {
            HostField::BuildingNumber => &self.building_number,
            HostField::Street1 => &self.street1,
            HostField::Street2 => &self.street2,
            HostField::City => &self.city,
            HostField::County => &self.county,
            HostField::State => &self.state,
            HostField::Zip => &self.zip,
        }
    }

    /// All seven fields in display order.
    pub fn fields(&self) -> [(HostField, &str); 7] {
        HostField::ALL.map(|field| (field, self.get(field)))
    }

    /// Check whether every field is empty.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }
}
