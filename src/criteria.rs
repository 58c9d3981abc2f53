/// Optional search parameters for members.
///
/// Every field is independent. An absent field places no constraint on the
/// result; it never means "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    /// Inclusive lower bound on age.
    pub age_goe: Option<i64>,
    /// Inclusive upper bound on age.
    pub age_loe: Option<i64>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i64) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i64) -> Self {
        self.age_loe = Some(age);
        self
    }
}
