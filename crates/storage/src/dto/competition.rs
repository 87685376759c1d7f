use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Case-insensitive substring search over competition id, name and country.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionSearch {
    #[validate(length(min = 3, message = "Query must be at least 3 characters long"))]
    pub query: String,
}

impl CompetitionSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// `LIKE` pattern for the lowercased query, with wildcards in the query escaped.
    pub fn like_pattern(&self) -> String {
        let escaped = self
            .query
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}
