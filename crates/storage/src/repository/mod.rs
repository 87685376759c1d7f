pub mod competition;
pub mod generation;
pub mod person;
pub mod ranking;
pub mod record;
pub mod region;

pub use competition::CompetitionRepository;
pub use generation::GenerationRepository;
pub use person::PersonRepository;
pub use ranking::RankingRepository;
pub use record::RecordRepository;
pub use region::RegionRepository;

/// Columns shared by `results`, `rankings` and `mean_rankings`, in `ResultCore` order.
pub(crate) const CORE_COLUMNS: &str = "competition_id, person_id, person_name, person_country_id, \
     continent_id, start_date, value1, value2, value3, score1, score2, score3, best_score, \
     best_result, mean_score, wca_record, regional_record, regional_mean_record";

pub(crate) const RESULT_COLUMNS: &str = "round_type_id, wca_pos, pos";

pub(crate) const RANK_COLUMNS: &str = "world_rank, continent_rank, country_rank, \
     wca_world_rank, wca_continent_rank, wca_country_rank";
