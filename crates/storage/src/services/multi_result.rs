//! Decoding and scoring of packed multi-blind attempt values.
//!
//! A valid attempt is stored as `DDTTTTTMM`: `DD = 99 - points`, `TTTTT` the
//! time in seconds and `MM` the number of missed cubes, where
//! `points = solved - missed`.

use thiserror::Error;

const POINTS_DIVISOR: i64 = 10_000_000;
const SECONDS_DIVISOR: i64 = 100;
const MAX_POINTS: i64 = 99;

/// Seconds allowed per attempted cube, up to the one hour cap.
const SECONDS_PER_CUBE: i64 = 600;
const TIME_LIMIT_CAP: i64 = 3600;
const CAPPED_FROM_CUBES: i64 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("value {raw} decodes to {solved} solved of {attempted} attempted")]
    InvalidCounts {
        raw: i64,
        solved: i64,
        attempted: i64,
    },

    #[error("value {0} decodes to a time of zero seconds")]
    ZeroTime(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAttempt {
    pub solved: u32,
    pub attempted: u32,
    pub seconds: u32,
}

impl DecodedAttempt {
    pub fn missed(&self) -> u32 {
        self.attempted - self.solved
    }

    /// Time limit in seconds for this many attempted cubes.
    pub fn time_limit(&self) -> u32 {
        let attempted = i64::from(self.attempted);
        let limit = if attempted < CAPPED_FROM_CUBES {
            attempted * SECONDS_PER_CUBE
        } else {
            TIME_LIMIT_CAP
        };
        limit as u32
    }

    /// `solved * accuracy / sqrt(fraction of the time limit used)`.
    pub fn score(&self) -> f64 {
        let solved = f64::from(self.solved);
        let accuracy = solved / f64::from(self.attempted);
        let time_used = f64::from(self.seconds) / f64::from(self.time_limit());

        solved * accuracy / time_used.sqrt()
    }

    /// Packs the components back into the upstream representation.
    pub fn encode(&self) -> i64 {
        let missed = i64::from(self.missed());
        let points = i64::from(self.solved) - missed;

        (MAX_POINTS - points) * POINTS_DIVISOR + i64::from(self.seconds) * SECONDS_DIVISOR + missed
    }
}

/// One attempt slot of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The slot was not used.
    Skipped,
    /// DNF or DNS; keeps the raw negative value.
    Invalid(i64),
    Valid(DecodedAttempt),
}

impl Attempt {
    pub fn decode(raw: i64) -> Result<Self, DecodeError> {
        if raw == 0 {
            return Ok(Self::Skipped);
        }
        if raw < 0 {
            return Ok(Self::Invalid(raw));
        }

        let points = MAX_POINTS - raw / POINTS_DIVISOR;
        let seconds = (raw % POINTS_DIVISOR) / SECONDS_DIVISOR;
        let missed = raw % SECONDS_DIVISOR;
        let solved = points + missed;
        let attempted = solved + missed;

        if solved < 0 || attempted <= 0 {
            return Err(DecodeError::InvalidCounts {
                raw,
                solved,
                attempted,
            });
        }
        if seconds == 0 {
            return Err(DecodeError::ZeroTime(raw));
        }

        Ok(Self::Valid(DecodedAttempt {
            solved: solved as u32,
            attempted: attempted as u32,
            seconds: seconds as u32,
        }))
    }

    pub fn score(&self) -> AttemptScore {
        match self {
            Self::Skipped => AttemptScore::Unset,
            Self::Invalid(raw) => AttemptScore::Sentinel(*raw),
            Self::Valid(decoded) => AttemptScore::Value(decoded.score()),
        }
    }
}

/// Score of one attempt slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptScore {
    Unset,
    /// Raw negative value, ordered below every real score.
    Sentinel(i64),
    Value(f64),
}

impl AttemptScore {
    /// Column representation: sentinels keep their raw value.
    pub fn as_column(&self) -> Option<f64> {
        match self {
            Self::Unset => None,
            Self::Sentinel(raw) => Some(*raw as f64),
            Self::Value(score) => Some(*score),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel(_))
    }

    pub fn positive(&self) -> Option<f64> {
        match self {
            Self::Value(score) if *score > 0.0 => Some(*score),
            _ => None,
        }
    }
}

/// Scores all three slots of a result. A malformed slot fails the whole row.
pub fn score_attempts(values: [i64; 3]) -> Result<[AttemptScore; 3], DecodeError> {
    let mut scores = [AttemptScore::Unset; 3];
    for (slot, raw) in scores.iter_mut().zip(values) {
        *slot = Attempt::decode(raw)?.score();
    }
    Ok(scores)
}

/// Best score among the slots and the raw value that achieved it.
///
/// Sentinels take part, so a row made only of DNFs has a negative best.
/// Ties go to the earliest slot. Returns `(None, 0)` when every slot is unset.
pub fn best_of(values: [i64; 3], scores: &[AttemptScore; 3]) -> (Option<f64>, i64) {
    let mut best: Option<(f64, i64)> = None;

    for (raw, score) in values.into_iter().zip(scores) {
        let Some(value) = score.as_column() else {
            continue;
        };
        match best {
            Some((current, _)) if current >= value => {}
            _ => best = Some((value, raw)),
        }
    }

    match best {
        Some((score, raw)) => (Some(score), raw),
        None => (None, 0),
    }
}
