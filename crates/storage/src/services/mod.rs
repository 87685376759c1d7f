//! The batch scoring engine: attempt scores, records, rankings and positions.
//!
//! Everything here is synchronous and works on fully materialized rows.

pub mod generation;
pub mod mean_score;
pub mod multi_result;
pub mod positions;
pub mod rankings;
pub mod records;
pub mod reference;

pub use generation::{Generation, GenerationReport, build_generation};

use std::cmp::Ordering;

/// Orders values highest first with missing values last.
pub(crate) fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Dense ranks within one group, highest value first. Equal values (including
/// missing ones) share a rank and the next value gets the following rank.
pub(crate) fn dense_descending(mut members: Vec<(usize, Option<f64>)>) -> Vec<(usize, i64)> {
    members.sort_by(|a, b| descending_missing_last(a.1, b.1).then(a.0.cmp(&b.0)));

    let mut ranked = Vec::with_capacity(members.len());
    let mut rank = 0;
    let mut previous = None;
    for (index, value) in members {
        if previous != Some(value) {
            rank += 1;
            previous = Some(value);
        }
        ranked.push((index, rank));
    }
    ranked
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::models::{
        Competition, Continent, Country, RawResult, ResultCore, ResultRow, SourceSnapshot,
    };

    pub fn continents() -> Vec<Continent> {
        vec![
            Continent {
                id: "_Asia".to_string(),
                name: "Asia".to_string(),
                record_name: "AsR".to_string(),
            },
            Continent {
                id: "_Europe".to_string(),
                name: "Europe".to_string(),
                record_name: "ER".to_string(),
            },
        ]
    }

    pub fn countries() -> Vec<Country> {
        [
            ("Japan", "_Asia", "JP"),
            ("Norway", "_Europe", "NO"),
            ("Sweden", "_Europe", "SE"),
            ("XA", "_Multiple Continents", "XA"),
        ]
        .into_iter()
        .map(|(id, continent_id, iso2)| Country {
            id: id.to_string(),
            name: id.to_string(),
            continent_id: continent_id.to_string(),
            iso2: iso2.to_string(),
            has_results: false,
        })
        .collect()
    }

    pub fn snapshot() -> SourceSnapshot {
        SourceSnapshot {
            countries: countries(),
            continents: continents(),
            ..SourceSnapshot::default()
        }
    }

    pub fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    pub fn competition(id: &str, country_id: &str, start_date: &str) -> Competition {
        Competition {
            id: id.to_string(),
            name: id.to_string(),
            country_id: country_id.to_string(),
            start_date: date(start_date),
        }
    }

    pub fn raw_result(
        person_id: &str,
        country_id: &str,
        competition_id: &str,
        values: [i64; 3],
    ) -> RawResult {
        RawResult {
            competition_id: competition_id.to_string(),
            round_type_id: "f".to_string(),
            person_id: person_id.to_string(),
            person_name: person_id.to_string(),
            person_country_id: country_id.to_string(),
            value1: values[0],
            value2: values[1],
            value3: values[2],
            wca_record: None,
            wca_pos: 1,
        }
    }

    /// A scored result whose best and mean score are both `score`.
    pub fn result_with_single(
        person_id: &str,
        country_id: &str,
        competition_id: &str,
        start_date: &str,
        score: f64,
    ) -> ResultRow {
        let continent_id = countries()
            .into_iter()
            .find(|country| country.id == country_id)
            .map(|country| country.continent_id);

        ResultRow {
            core: ResultCore {
                competition_id: competition_id.to_string(),
                person_id: person_id.to_string(),
                person_name: person_id.to_string(),
                person_country_id: country_id.to_string(),
                continent_id,
                start_date: date(start_date),
                value1: 0,
                value2: 0,
                value3: 0,
                score1: Some(score),
                score2: None,
                score3: None,
                best_score: Some(score),
                best_result: 0,
                mean_score: Some(score),
                wca_record: None,
                regional_record: None,
                regional_mean_record: None,
            },
            round_type_id: "1".to_string(),
            wca_pos: 1,
            pos: 0,
        }
    }
}
