//! Query syntax helpers.
//!
//! Answers may carry a small amount of syntax on top of plain values:
//!
//! - `-x` negates a collection membership test ("does not contain x"),
//! - `<N`, `>N`, `!N` compare a numeric feature against the integer `N`.
//!
//! Because of this, catalog values may never start with one of
//! [`RESERVED_PREFIXES`].

use super::value::Scalar;

/// Characters that introduce query syntax and are forbidden as the first
/// character of a catalog value.
pub const RESERVED_PREFIXES: [char; 4] = ['<', '>', '!', '-'];

const NEGATION: char = '-';

/// Returns the reserved character a value starts with, if any.
pub fn reserved_prefix(value: &str) -> Option<char> {
    value.chars().next().filter(|c| RESERVED_PREFIXES.contains(c))
}

/// Returns the negated value of a `-x` term, or `None` for a plain term.
pub fn negated(term: &str) -> Option<&str> {
    term.strip_prefix(NEGATION)
}

/// Comparison operator of a numeric query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessThan,
    GreaterThan,
    NotEqual,
}

/// A parsed `<N`, `>N` or `!N` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericComparison {
    pub comparison: Comparison,
    pub operand: i64,
}

impl NumericComparison {
    /// Parses an operator expression. Returns `None` for anything else.
    pub fn parse(expression: &str) -> Option<Self> {
        let mut chars = expression.chars();
        let comparison = match chars.next()? {
            '<' => Comparison::LessThan,
            '>' => Comparison::GreaterThan,
            '!' => Comparison::NotEqual,
            _ => return None,
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let operand = digits.parse().ok()?;
        Some(Self {
            comparison,
            operand,
        })
    }

    /// Evaluates the comparison with `value` on the left-hand side.
    pub fn evaluate(&self, value: f64) -> bool {
        let operand = self.operand as f64;
        match self.comparison {
            Comparison::LessThan => value < operand,
            Comparison::GreaterThan => value > operand,
            Comparison::NotEqual => value != operand,
        }
    }
}

/// Interprets a raw answer token as typed by a user or sent in a query string.
///
/// `true` and `false` become booleans; everything else stays text. Digit
/// tokens still reach numeric features through their rendered value.
pub fn parse_answer_token(token: &str) -> Scalar {
    match token {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => Scalar::Text(token.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_prefix_detects_each_operator() {
        for prefix in RESERVED_PREFIXES {
            assert_eq!(reserved_prefix(&format!("{}x", prefix)), Some(prefix));
        }
        assert_eq!(reserved_prefix("ham"), None);
        assert_eq!(reserved_prefix(""), None);
        assert_eq!(reserved_prefix("a-b"), None);
    }

    #[test]
    fn negated_strips_only_leading_dash() {
        assert_eq!(negated("-pineapple"), Some("pineapple"));
        assert_eq!(negated("pine-apple"), None);
    }

    #[test]
    fn numeric_comparison_parses_operators() {
        assert_eq!(
            NumericComparison::parse("<5"),
            Some(NumericComparison {
                comparison: Comparison::LessThan,
                operand: 5
            })
        );
        assert_eq!(
            NumericComparison::parse(">12").map(|c| c.comparison),
            Some(Comparison::GreaterThan)
        );
        assert_eq!(
            NumericComparison::parse("!3").map(|c| c.comparison),
            Some(Comparison::NotEqual)
        );
    }

    #[test]
    fn numeric_comparison_rejects_malformed_expressions() {
        assert_eq!(NumericComparison::parse("5"), None);
        assert_eq!(NumericComparison::parse("<"), None);
        assert_eq!(NumericComparison::parse("<a"), None);
        assert_eq!(NumericComparison::parse("<-3"), None);
        assert_eq!(NumericComparison::parse("=3"), None);
    }

    #[test]
    fn numeric_comparison_evaluates_against_value() {
        let lt = NumericComparison::parse("<5").unwrap();
        assert!(lt.evaluate(4.0));
        assert!(!lt.evaluate(5.0));

        let gt = NumericComparison::parse(">5").unwrap();
        assert!(gt.evaluate(7.0));
        assert!(!gt.evaluate(5.0));

        let ne = NumericComparison::parse("!5").unwrap();
        assert!(ne.evaluate(3.0));
        assert!(!ne.evaluate(5.0));
    }

    #[test]
    fn answer_tokens_are_typed() {
        assert_eq!(parse_answer_token("true"), Scalar::Bool(true));
        assert_eq!(parse_answer_token("false"), Scalar::Bool(false));
        assert_eq!(parse_answer_token("42"), Scalar::from("42"));
        assert_eq!(parse_answer_token("<4"), Scalar::from("<4"));
        assert_eq!(parse_answer_token("white wine"), Scalar::from("white wine"));
        assert_eq!(parse_answer_token(""), Scalar::from(""));
    }
}
