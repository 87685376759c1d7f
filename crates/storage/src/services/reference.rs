use std::collections::{HashMap, HashSet};

use crate::error::{Result, StorageError};
use crate::models::{Continent, Country};

use super::records::RecordTag;

/// Read-only region lookups for one run, built from that run's snapshot.
#[derive(Debug)]
pub struct ReferenceTables<'a> {
    continent_of_country: HashMap<&'a str, &'a str>,
    record_names: HashMap<&'a str, &'a str>,
}

impl<'a> ReferenceTables<'a> {
    /// Builds the lookups, rejecting duplicate ids and record labels that are
    /// empty, shared by two continents, or equal to another tier's label.
    pub fn new(continents: &'a [Continent], countries: &'a [Country]) -> Result<Self> {
        let reserved: HashSet<&str> = [RecordTag::World, RecordTag::National, RecordTag::Personal]
            .iter()
            .filter_map(RecordTag::fixed_label)
            .collect();

        let mut record_names = HashMap::with_capacity(continents.len());
        let mut labels = HashSet::with_capacity(continents.len());

        for continent in continents {
            let label = continent.record_name.trim();
            if label.is_empty() {
                return Err(StorageError::ConstraintViolation(format!(
                    "continent '{}' has an empty record name",
                    continent.id
                )));
            }
            if reserved.contains(label) {
                return Err(StorageError::ConstraintViolation(format!(
                    "continent '{}' uses reserved record name '{}'",
                    continent.id, label
                )));
            }
            if !labels.insert(label) {
                return Err(StorageError::ConstraintViolation(format!(
                    "record name '{}' is used by more than one continent",
                    label
                )));
            }
            if record_names.insert(continent.id.as_str(), label).is_some() {
                return Err(StorageError::ConstraintViolation(format!(
                    "duplicate continent id '{}'",
                    continent.id
                )));
            }
        }

        let mut continent_of_country = HashMap::with_capacity(countries.len());
        for country in countries {
            if continent_of_country
                .insert(country.id.as_str(), country.continent_id.as_str())
                .is_some()
            {
                return Err(StorageError::ConstraintViolation(format!(
                    "duplicate country id '{}'",
                    country.id
                )));
            }
        }

        Ok(Self {
            continent_of_country,
            record_names,
        })
    }

    pub fn continent_of(&self, country_id: &str) -> Option<&'a str> {
        self.continent_of_country.get(country_id).copied()
    }

    pub fn record_name(&self, continent_id: &str) -> Option<&'a str> {
        self.record_names.get(continent_id).copied()
    }

    /// Continent whose record a competitor from `country_id` can set, if it has a label.
    pub fn record_continent(&self, country_id: &str) -> Option<&'a str> {
        self.continent_of(country_id)
            .filter(|continent| self.record_names.contains_key(continent))
    }
}
