use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    Competition, Continent, Country, Metadata, Metric, NativeRank, Person, RankingRow, RawResult,
    ResultCore, ResultRow, RoundType, SourceSnapshot,
};

use super::mean_score::MeanScore;
use super::multi_result::{AttemptScore, best_of, score_attempts};
use super::positions::assign_positions;
use super::rankings::build_rankings;
use super::records::{BestResultTimeline, RecordTag, RecordTimeline};
use super::reference::ReferenceTables;

/// Every table the serving store holds, computed by one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub countries: Vec<Country>,
    pub continents: Vec<Continent>,
    pub competitions: Vec<Competition>,
    pub persons: Vec<Person>,
    pub round_types: Vec<RoundType>,
    pub results: Vec<ResultRow>,
    pub rankings: Vec<RankingRow>,
    pub mean_rankings: Vec<RankingRow>,
    pub metadata: Metadata,
}

/// Row-level anomalies seen while building a generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub results: usize,
    /// Results of competitions missing from the snapshot, e.g. cancelled ones.
    pub orphaned: usize,
    /// Results with an attempt value that could not be decoded; their scores are left unset.
    pub undecodable: usize,
}

/// Turns one upstream snapshot into a complete generation of derived tables.
pub fn build_generation(
    snapshot: SourceSnapshot,
    updated_at: DateTime<Utc>,
) -> Result<(Generation, GenerationReport)> {
    let SourceSnapshot {
        mut countries,
        mut continents,
        mut competitions,
        mut persons,
        mut round_types,
        native_ranks,
        results: raw_results,
    } = snapshot;

    countries.sort_by(|a, b| a.id.cmp(&b.id));
    continents.sort_by(|a, b| a.id.cmp(&b.id));
    competitions.sort_by(|a, b| a.id.cmp(&b.id));
    persons.sort_by(|a, b| a.id.cmp(&b.id).then(a.sub_id.cmp(&b.sub_id)));
    round_types.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.id.cmp(&b.id)));

    let mut report = GenerationReport::default();

    let results = {
        let reference = ReferenceTables::new(&continents, &countries)?;
        let start_dates: HashMap<&str, NaiveDate> = competitions
            .iter()
            .map(|competition| (competition.id.as_str(), competition.start_date))
            .collect();

        let mut results = Vec::with_capacity(raw_results.len());
        for raw in raw_results {
            let Some(&start_date) = start_dates.get(raw.competition_id.as_str()) else {
                debug!(
                    competition_id = %raw.competition_id,
                    person_id = %raw.person_id,
                    "Skipping result of unknown competition"
                );
                report.orphaned += 1;
                continue;
            };
            let continent_id = reference.continent_of(&raw.person_country_id);

            let (row, decoded) = score_result(raw, start_date, continent_id);
            if !decoded {
                report.undecodable += 1;
            }
            results.push(row);
        }

        results.sort_by(|a, b| {
            a.core
                .start_date
                .cmp(&b.core.start_date)
                .then_with(|| a.core.competition_id.cmp(&b.core.competition_id))
                .then_with(|| a.round_type_id.cmp(&b.round_type_id))
                .then_with(|| a.core.person_id.cmp(&b.core.person_id))
        });

        backfill_personal_records(&mut results);
        mark_regional_records(&mut results, Metric::Single, &reference);
        mark_regional_records(&mut results, Metric::Mean, &reference);
        assign_positions(&mut results);
        results
    };
    report.results = results.len();

    let native_ranks: HashMap<&str, &NativeRank> = native_ranks
        .iter()
        .map(|rank| (rank.person_id.as_str(), rank))
        .collect();
    let rankings = build_rankings(&results, Metric::Single, &native_ranks);
    let mean_rankings = build_rankings(&results, Metric::Mean, &native_ranks);

    let with_results: HashSet<&str> = results
        .iter()
        .map(|row| row.core.person_country_id.as_str())
        .collect();
    for country in &mut countries {
        country.has_results = with_results.contains(country.id.as_str());
    }

    let generation = Generation {
        countries,
        continents,
        competitions,
        persons,
        round_types,
        results,
        rankings,
        mean_rankings,
        metadata: Metadata { updated_at },
    };

    Ok((generation, report))
}

/// Scores one upstream row. The flag is false when an attempt could not be
/// decoded, in which case the row keeps its raw values but no scores.
fn score_result(
    raw: RawResult,
    start_date: NaiveDate,
    continent_id: Option<&str>,
) -> (ResultRow, bool) {
    let values = raw.values();
    let (scores, decoded) = match score_attempts(values) {
        Ok(scores) => (scores, true),
        Err(e) => {
            warn!(
                competition_id = %raw.competition_id,
                round_type_id = %raw.round_type_id,
                person_id = %raw.person_id,
                error = %e,
                "Leaving result unscored"
            );
            ([AttemptScore::Unset; 3], false)
        }
    };

    let (best_score, best_result) = best_of(values, &scores);
    let mean_score = MeanScore::from_attempts(values, &scores).as_column();
    let [score1, score2, score3] = scores.map(|score| score.as_column());

    let row = ResultRow {
        core: ResultCore {
            competition_id: raw.competition_id,
            person_id: raw.person_id,
            person_name: raw.person_name,
            person_country_id: raw.person_country_id,
            continent_id: continent_id.map(str::to_string),
            start_date,
            value1: raw.value1,
            value2: raw.value2,
            value3: raw.value3,
            score1,
            score2,
            score3,
            best_score,
            best_result,
            mean_score,
            wca_record: raw.wca_record.filter(|tag| !tag.trim().is_empty()),
            regional_record: None,
            regional_mean_record: None,
        },
        round_type_id: raw.round_type_id,
        wca_pos: raw.wca_pos,
        pos: 0,
    };

    (row, decoded)
}

/// Tags personal records that upstream left unmarked.
fn backfill_personal_records(results: &mut [ResultRow]) {
    let flags = BestResultTimeline::new(results).personal_records();
    let label = RecordTag::Personal.fixed_label().map(str::to_string);

    for (row, is_record) in results.iter_mut().zip(flags) {
        if is_record && row.core.wca_record.is_none() {
            row.core.wca_record = label.clone();
        }
    }
}

fn mark_regional_records(
    results: &mut [ResultRow],
    metric: Metric,
    reference: &ReferenceTables<'_>,
) {
    let tags = RecordTimeline::new(results, metric).mark(reference);

    for (row, tag) in results.iter_mut().zip(tags) {
        let record_name = row
            .core
            .continent_id
            .as_deref()
            .and_then(|continent| reference.record_name(continent));
        let label = tag.and_then(|tag| tag.render(record_name));

        match metric {
            Metric::Single => row.core.regional_record = label,
            Metric::Mean => row.core.regional_mean_record = label,
        }
    }
}
