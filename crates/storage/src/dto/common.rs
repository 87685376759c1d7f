use crate::error::{Result, StorageError};

/// Number of ranks served per page.
pub const PAGE_SIZE: i64 = 100;

/// A 1-indexed page of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPage {
    page: u32,
}

impl Default for RankPage {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl RankPage {
    pub fn new(page: u32) -> Result<Self> {
        let page = Self { page };
        page.validate()?;
        Ok(page)
    }

    pub fn number(&self) -> u32 {
        self.page
    }

    fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(StorageError::InvalidQuery("page must be >= 1".to_string()));
        }
        Ok(())
    }

    /// Ranks on this page are those in `(lower, upper]`.
    pub fn rank_bounds(&self) -> (i64, i64) {
        let page = i64::from(self.page);
        ((page - 1) * PAGE_SIZE, page * PAGE_SIZE)
    }
}
