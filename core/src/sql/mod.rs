mod chunk;
mod tokens;

use std::borrow::Cow;
use std::fmt::{Display, Write};

pub use chunk::*;
use smallvec::SmallVec;
pub use tokens::*;

use crate::schema::{Column, Table};
use crate::traits::ToSQL;
use crate::value::Value;

/// SQL fragment builder with flat chunk storage.
///
/// Uses `SmallVec<[SQLChunk; 8]>` for inline storage of typical SQL fragments
/// without heap allocation. Builder methods consume `self` and hand back the
/// extended fragment, so a fragment is never shared while it is being built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SQL<'a> {
    pub chunks: SmallVec<[SQLChunk<'a>; 8]>,
}

impl<'a> SQL<'a> {
    // ==================== constructors ====================

    /// Creates an empty SQL fragment
    #[inline]
    pub const fn empty() -> Self {
        Self {
            chunks: SmallVec::new_const(),
        }
    }

    /// Creates SQL with a single token
    #[inline]
    pub fn token(t: Token) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Token(t)],
        }
    }

    /// Creates SQL with a quoted identifier
    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Ident(name.into())],
        }
    }

    /// Creates SQL with raw text (unquoted)
    #[inline]
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Raw(text.into())],
        }
    }

    /// Creates SQL with a single unsigned integer literal.
    #[inline]
    pub fn number(value: u64) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Number(value)],
        }
    }

    /// Creates SQL with a single parameter value
    #[inline]
    pub fn param(value: impl Into<Value<'a>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Param(value.into())],
        }
    }

    /// Creates SQL referencing a table
    #[inline]
    pub fn table(table: Table) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Table(table)],
        }
    }

    /// Creates SQL referencing a column
    #[inline]
    pub fn column(column: Column) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Column(column)],
        }
    }

    /// Creates SQL for a function call: NAME(args)
    /// Subqueries are automatically wrapped in parentheses: NAME((SELECT ...))
    #[inline]
    pub fn func(name: &'static str, args: SQL<'a>) -> Self {
        SQL::raw(name)
            .push(Token::LPAREN)
            .append(args.parens_if_subquery())
            .push(Token::RPAREN)
    }

    // ==================== builder methods ====================

    /// Append another SQL fragment (flat extend)
    #[inline]
    pub fn append(mut self, other: impl Into<SQL<'a>>) -> Self {
        let other = other.into();

        if self.chunks.is_empty() {
            return other;
        }
        if other.chunks.is_empty() {
            return self;
        }

        self.chunks.extend(other.chunks);
        self
    }

    /// Push a single chunk
    #[inline]
    pub fn push(mut self, chunk: impl Into<SQLChunk<'a>>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    // ==================== combinators ====================

    /// Joins multiple SQL fragments with a separator
    pub fn join<T>(sqls: T, separator: Token) -> SQL<'a>
    where
        T: IntoIterator,
        T::Item: ToSQL<'a>,
    {
        let mut iter = sqls.into_iter();
        let Some(first) = iter.next() else {
            return SQL::empty();
        };

        let mut result = first.into_sql();
        for item in iter {
            result.chunks.push(SQLChunk::Token(separator));
            result.chunks.extend(item.into_sql().chunks);
        }
        result
    }

    /// Wrap in parentheses: (self)
    #[inline]
    pub fn parens(self) -> Self {
        SQL::token(Token::LPAREN).append(self).push(Token::RPAREN)
    }

    /// Parenthesizes the fragment only when it is a bare `SELECT`.
    #[inline]
    pub fn parens_if_subquery(self) -> Self {
        if self.is_subquery() {
            self.parens()
        } else {
            self
        }
    }

    /// Check if this SQL fragment is a subquery (starts with SELECT)
    #[inline]
    pub fn is_subquery(&self) -> bool {
        matches!(self.chunks.first(), Some(SQLChunk::Token(Token::SELECT)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Creates an aliased version: self AS "name"
    ///
    /// A subquery is parenthesized first, so the alias never attaches to
    /// its last selected column.
    pub fn alias(self, name: impl Into<Cow<'a, str>>) -> SQL<'a> {
        self.parens_if_subquery()
            .push(Token::AS).push(SQLChunk::Ident(name.into()))
    }

    /// Strips a trailing `AS "name"` and returns the bare expression with the alias.
    ///
    /// A bare subquery is returned whole: its trailing alias belongs to its
    /// own last column.
    pub fn split_alias(mut self) -> (SQL<'a>, Option<Cow<'a, str>>) {
        let len = self.chunks.len();
        if !self.is_subquery()
            && len >= 2
            && matches!(self.chunks[len - 2], SQLChunk::Token(Token::AS))
            && matches!(self.chunks[len - 1], SQLChunk::Ident(_))
            && let Some(SQLChunk::Ident(name)) = self.chunks.pop()
        {
            self.chunks.pop();
            return (self, Some(name));
        }
        (self, None)
    }

    // ==================== output methods ====================

    /// Detaches every parameter from borrowed input.
    pub fn into_owned(self) -> SQL<'static> {
        let chunks = self
            .chunks
            .into_iter()
            .map(|chunk| match chunk {
                SQLChunk::Token(t) => SQLChunk::Token(t),
                SQLChunk::Ident(s) => SQLChunk::Ident(Cow::Owned(s.into_owned())),
                SQLChunk::Raw(s) => SQLChunk::Raw(Cow::Owned(s.into_owned())),
                SQLChunk::Number(n) => SQLChunk::Number(n),
                SQLChunk::Param(v) => SQLChunk::Param(v.into_owned()),
                SQLChunk::Table(t) => SQLChunk::Table(t),
                SQLChunk::Column(c) => SQLChunk::Column(c),
            })
            .collect();
        SQL { chunks }
    }

    /// Returns the SQL string with `?` placeholders.
    pub fn sql(&self) -> String {
        let mut buf = String::with_capacity(self.chunks.len().saturating_mul(8).max(64));
        self.write_to(&mut buf);
        buf
    }

    /// Generates the SQL string and collects parameter references in a single pass.
    pub fn build(&self) -> (String, SmallVec<[&Value<'a>; 8]>) {
        let mut buf = String::with_capacity(self.chunks.len().saturating_mul(8).max(64));
        let mut params: SmallVec<[&Value<'a>; 8]> = SmallVec::new();

        for (i, chunk) in self.chunks.iter().enumerate() {
            chunk.write(&mut buf);
            if let SQLChunk::Param(value) = chunk {
                params.push(value);
            }
            if self.needs_space(i) {
                let _ = buf.write_char(' ');
            }
        }

        (buf, params)
    }

    /// Write SQL to a buffer with `?` placeholders.
    pub fn write_to(&self, buf: &mut impl Write) {
        for (i, chunk) in self.chunks.iter().enumerate() {
            chunk.write(buf);
            if self.needs_space(i) {
                let _ = buf.write_char(' ');
            }
        }
    }

    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks.get(index + 1) else {
            return false;
        };

        chunk_needs_space(&self.chunks[index], next)
    }

    /// Returns an iterator over references to parameter values
    pub fn params(&self) -> impl Iterator<Item = &Value<'a>> {
        self.chunks.iter().filter_map(|chunk| {
            if let SQLChunk::Param(value) = chunk {
                Some(value)
            } else {
                None
            }
        })
    }

    /// A key identifying the expression: its text plus its bound values.
    pub fn identity(&self) -> String {
        let (mut text, params) = self.build();
        for p in params {
            let _ = write!(text, "|{p}");
        }
        text
    }
}

/// Canonical spacing logic for SQL chunk rendering.
pub(crate) fn chunk_needs_space(current: &SQLChunk<'_>, next: &SQLChunk<'_>) -> bool {
    match (current, next) {
        // No space before closing/separator punctuation
        (_, SQLChunk::Token(Token::RPAREN | Token::COMMA | Token::SEMI | Token::DOT)) => false,
        // No space after opening punctuation
        (SQLChunk::Token(Token::LPAREN | Token::DOT), _) => false,
        // Space after comma
        (SQLChunk::Token(Token::COMMA), _) => true,
        // Space after closing paren if next is word-like (e.g., ") FROM")
        (SQLChunk::Token(Token::RPAREN), next) => next.is_word_like() || matches!(next, SQLChunk::Token(t) if t.is_operator()),
        // Function calls: raw name directly followed by "("
        (SQLChunk::Raw(_), SQLChunk::Token(Token::LPAREN)) => false,
        // Space before opening paren if preceded by word-like (e.g., "IN (")
        (current, SQLChunk::Token(Token::LPAREN)) => {
            current.is_word_like() || matches!(current, SQLChunk::Token(t) if t.is_operator())
        }
        // Space around comparison/arithmetic operators
        (SQLChunk::Token(t), _) if t.is_operator() => true,
        (_, SQLChunk::Token(t)) if t.is_operator() => true,
        // Space between all word-like chunks
        _ => current.is_word_like() && next.is_word_like(),
    }
}

// ==================== trait implementations ====================

impl<'a> From<&'a str> for SQL<'a> {
    fn from(s: &'a str) -> Self {
        SQL::raw(s)
    }
}

impl<'a> From<Token> for SQL<'a> {
    fn from(value: Token) -> Self {
        SQL::token(value)
    }
}

impl<'a> Display for SQL<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let params: Vec<_> = self.params().collect();
        write!(f, r#"sql: "{}", params: {:?}"#, self.sql(), params)
    }
}

impl<'a> ToSQL<'a> for SQL<'a> {
    fn to_sql(&self) -> SQL<'a> {
        self.clone()
    }

    fn into_sql(self) -> SQL<'a> {
        self
    }
}

impl<'a, T> FromIterator<T> for SQL<'a>
where
    SQLChunk<'a>: From<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let chunks = SmallVec::from_iter(iter.into_iter().map(SQLChunk::from));
        Self { chunks }
    }
}

impl<'a> IntoIterator for SQL<'a> {
    type Item = SQLChunk<'a>;
    type IntoIter = smallvec::IntoIter<[SQLChunk<'a>; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}
