use super::multi_result::AttemptScore;

/// Column value marking a mean that was attempted but not finished.
pub const DNF_MEAN: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeanScore {
    /// Fewer than three attempts were made.
    Unset,
    /// Three attempts were made and at least one did not finish.
    Dnf,
    Value(f64),
}

impl MeanScore {
    pub fn from_attempts(values: [i64; 3], scores: &[AttemptScore; 3]) -> Self {
        let positives: Vec<f64> = scores.iter().filter_map(AttemptScore::positive).collect();
        if let &[s1, s2, s3] = positives.as_slice() {
            return Self::Value((s1 + s2 + s3) / 3.0);
        }

        let three_attempts = values.iter().all(|raw| *raw != 0);
        let has_dnf = scores.iter().any(AttemptScore::is_sentinel);
        if three_attempts && has_dnf {
            return Self::Dnf;
        }

        Self::Unset
    }

    pub fn as_column(&self) -> Option<f64> {
        match self {
            Self::Unset => None,
            Self::Dnf => Some(DNF_MEAN),
            Self::Value(mean) => Some(*mean),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::multi_result::score_attempts;

    #[test]
    fn test_three_valid_scores_average_exactly() {
        let values = [810_240_002, 970_060_000, 930_123_401];
        let scores = score_attempts(values).unwrap();
        let expected = (scores[0].as_column().unwrap()
            + scores[1].as_column().unwrap()
            + scores[2].as_column().unwrap())
            / 3.0;

        assert_eq!(
            MeanScore::from_attempts(values, &scores),
            MeanScore::Value(expected)
        );
    }

    #[test]
    fn test_one_dnf_among_three_attempts() {
        let values = [810_240_002, -1, 930_123_401];
        let scores = score_attempts(values).unwrap();
        let mean = MeanScore::from_attempts(values, &scores);

        assert_eq!(mean, MeanScore::Dnf);
        assert_eq!(mean.as_column(), Some(-1.0));
    }

    #[test]
    fn test_fewer_than_three_attempts_is_unset() {
        let values = [810_240_002, 930_123_401, 0];
        let scores = score_attempts(values).unwrap();
        let mean = MeanScore::from_attempts(values, &scores);

        assert_eq!(mean, MeanScore::Unset);
        assert_eq!(mean.as_column(), None);
    }

    #[test]
    fn test_dnf_with_missing_attempt_is_unset() {
        let values = [-1, 930_123_401, 0];
        let scores = score_attempts(values).unwrap();
        assert_eq!(MeanScore::from_attempts(values, &scores), MeanScore::Unset);
    }
}
