use rosterdsl_core::{Result, RosterError, SQL, Token};

/// A validated `LIMIT`/`OFFSET` window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Page {
    offset: u64,
    limit: u64,
}

impl Page {
    /// Rejects a negative offset and a limit that is not positive.
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        if offset < 0 {
            return Err(RosterError::Validation(format!(
                "offset must be >= 0, got {offset}"
            )));
        }
        if limit <= 0 {
            return Err(RosterError::Validation(format!(
                "limit must be > 0, got {limit}"
            )));
        }
        Ok(Self {
            offset: offset.try_into()?,
            limit: limit.try_into()?,
        })
    }

    /// The first `limit` rows.
    pub fn first(limit: i64) -> Result<Self> {
        Self::new(0, limit)
    }

    #[inline]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Fails when the limit exceeds `max`.
    pub fn check_max(&self, max: Option<u64>) -> Result<()> {
        match max {
            Some(max) if self.limit > max => Err(RosterError::Validation(format!(
                "limit {} exceeds the maximum page size {max}",
                self.limit
            ))),
            _ => Ok(()),
        }
    }

    /// `LIMIT n [OFFSET m]`
    pub(crate) fn to_sql<'a>(self) -> SQL<'a> {
        let sql = SQL::token(Token::LIMIT).append(SQL::number(self.limit));
        if self.offset == 0 {
            sql
        } else {
            sql.push(Token::OFFSET).append(SQL::number(self.offset))
        }
    }
}
