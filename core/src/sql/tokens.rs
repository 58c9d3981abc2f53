/// SQL keywords, operators and punctuation.
///
/// Tokens render as fixed text; spacing between tokens is decided by
/// [`chunk_needs_space`](super::chunk_needs_space).
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // statements
    SELECT,
    FROM,
    WHERE,
    GROUP_BY,
    HAVING,
    ORDER_BY,
    LIMIT,
    OFFSET,
    INSERT,
    INTO,
    VALUES,
    UPDATE,
    SET,
    DELETE,
    ON,
    AS,
    DISTINCT,
    // logical
    AND,
    OR,
    NOT,
    // predicates
    IN,
    IS,
    NULL,
    BETWEEN,
    LIKE,
    // ordering
    ASC,
    DESC,
    NULLS_FIRST,
    NULLS_LAST,
    // case
    CASE,
    WHEN,
    THEN,
    ELSE,
    END,
    // comparison
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,
    // arithmetic / string
    PLUS,
    MINUS,
    CONCAT,
    // punctuation
    LPAREN,
    RPAREN,
    COMMA,
    DOT,
    SEMI,
    STAR,
}

impl Token {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::GROUP_BY => "GROUP BY",
            Token::HAVING => "HAVING",
            Token::ORDER_BY => "ORDER BY",
            Token::LIMIT => "LIMIT",
            Token::OFFSET => "OFFSET",
            Token::INSERT => "INSERT",
            Token::INTO => "INTO",
            Token::VALUES => "VALUES",
            Token::UPDATE => "UPDATE",
            Token::SET => "SET",
            Token::DELETE => "DELETE",
            Token::ON => "ON",
            Token::AS => "AS",
            Token::DISTINCT => "DISTINCT",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::NOT => "NOT",
            Token::IN => "IN",
            Token::IS => "IS",
            Token::NULL => "NULL",
            Token::BETWEEN => "BETWEEN",
            Token::LIKE => "LIKE",
            Token::ASC => "ASC",
            Token::DESC => "DESC",
            Token::NULLS_FIRST => "NULLS FIRST",
            Token::NULLS_LAST => "NULLS LAST",
            Token::CASE => "CASE",
            Token::WHEN => "WHEN",
            Token::THEN => "THEN",
            Token::ELSE => "ELSE",
            Token::END => "END",
            Token::EQ => "=",
            Token::NE => "<>",
            Token::LT => "<",
            Token::GT => ">",
            Token::LE => "<=",
            Token::GE => ">=",
            Token::PLUS => "+",
            Token::MINUS => "-",
            Token::CONCAT => "||",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::COMMA => ",",
            Token::DOT => ".",
            Token::SEMI => ";",
            Token::STAR => "*",
        }
    }

    /// Binary operators get a space on both sides.
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ
                | Token::NE
                | Token::LT
                | Token::GT
                | Token::LE
                | Token::GE
                | Token::PLUS
                | Token::MINUS
                | Token::CONCAT
        )
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
