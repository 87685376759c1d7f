use serde::{Deserialize, Serialize};

use super::{Competition, Continent, Country, Person, RoundType};

/// One result row as read from upstream, before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub competition_id: String,
    pub round_type_id: String,
    pub person_id: String,
    pub person_name: String,
    pub person_country_id: String,
    pub value1: i64,
    pub value2: i64,
    pub value3: i64,
    /// Upstream single record tag ("WR", "NR", "ER", ...), if any.
    pub wca_record: Option<String>,
    pub wca_pos: i32,
}

impl RawResult {
    pub fn values(&self) -> [i64; 3] {
        [self.value1, self.value2, self.value3]
    }
}

/// Upstream's own single ranking for one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRank {
    pub person_id: String,
    pub world_rank: i64,
    pub continent_rank: i64,
    pub country_rank: i64,
}

/// Everything one pipeline run reads from upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSnapshot {
    pub countries: Vec<Country>,
    pub continents: Vec<Continent>,
    pub competitions: Vec<Competition>,
    pub persons: Vec<Person>,
    pub round_types: Vec<RoundType>,
    pub native_ranks: Vec<NativeRank>,
    pub results: Vec<RawResult>,
}
