mod competition;
mod continent;
mod country;
mod metadata;
mod metric;
mod person;
mod ranking;
mod result;
mod round_type;
mod source;

pub use competition::Competition;
pub use continent::Continent;
pub use country::Country;
pub use metadata::Metadata;
pub use metric::Metric;
pub use person::Person;
pub use ranking::{RankingRow, Ranks};
pub use result::{ResultCore, ResultRow};
pub use round_type::RoundType;
pub use source::{NativeRank, RawResult, SourceSnapshot};
