//! Static table and column descriptors.
//!
//! A [`Table`] carries its physical name and the alias it is referenced by
//! inside a statement. Two descriptors of the same table with different
//! aliases are independent sources, which is what self-joins and
//! subqueries over the outer table need.

/// Sort direction for ORDER BY clauses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Asc,
    Desc,
}

/// A table reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Table {
    name: &'static str,
    alias: &'static str,
}

impl Table {
    /// Creates a table referenced by its own name.
    pub const fn new(name: &'static str) -> Self {
        Self { name, alias: name }
    }

    /// Returns the same table under another alias.
    ///
    /// ```ignore
    /// let member_sub = MEMBER.alias("member_sub");
    /// // FROM "member" AS "member_sub"
    /// ```
    pub const fn alias(self, alias: &'static str) -> Self {
        Self {
            name: self.name,
            alias,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn alias_name(&self) -> &'static str {
        self.alias
    }

    #[inline]
    pub fn is_aliased(&self) -> bool {
        self.name != self.alias
    }

    /// A column of this table, qualified by the table's alias.
    pub const fn column(self, name: &'static str) -> Column {
        Column { table: self, name }
    }
}

/// A column qualified by the table alias it is read through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    table: Table,
    name: &'static str,
}

impl Column {
    #[inline]
    pub const fn table(&self) -> Table {
        self.table
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The same column read through a differently aliased table.
    pub const fn of(self, table: Table) -> Self {
        Self {
            table,
            name: self.name,
        }
    }
}
