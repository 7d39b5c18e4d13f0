use std::fmt;

use serde::{Deserialize, Serialize};

/// A single book record as stored in the backing JSON file.
///
/// Field contents arrive straight from submitted forms; nothing beyond
/// successful deserialization is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned at creation time as wall-clock
    /// milliseconds. Immutable once assigned.
    pub id: i64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Price, kept in whichever JSON representation it arrived in
    pub cost: Cost,
    /// Where the book can be bought
    pub shopping_url: String,
}

/// Payload for creating a book or fully replacing one's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub cost: Cost,
    pub shopping_url: String,
}

/// Book price: a JSON number or a numeric-looking string.
///
/// Data files contain both shapes: hand-seeded records tend to use
/// numbers, form submissions always arrive as text. The untagged
/// representation keeps each record exactly as stored, so rewriting the
/// file never changes a cost's JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Number(n) => write!(f, "{n}"),
            Cost::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Cost {
    fn from(s: &str) -> Self {
        Cost::Text(s.to_string())
    }
}

impl From<i64> for Cost {
    fn from(n: i64) -> Self {
        Cost::Number(n.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(cost: Cost) -> Book {
        Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            cost,
            shopping_url: "http://example.com/dune".to_string(),
        }
    }

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&sample_book(Cost::from(15))).unwrap();
        assert!(json.contains("\"shoppingUrl\""));
        assert!(!json.contains("shopping_url"));
    }

    #[test]
    fn numeric_cost_round_trips_as_a_number() {
        let json = r#"{"id":7,"title":"t","author":"a","cost":15,"shoppingUrl":"u"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.cost, Cost::from(15));

        let out = serde_json::to_string(&book).unwrap();
        assert!(out.contains("\"cost\":15"), "cost changed type: {out}");
        assert!(!out.contains("15.0"));
    }

    #[test]
    fn text_cost_round_trips_as_text() {
        let json = r#"{"id":7,"title":"t","author":"a","cost":"12.50","shoppingUrl":"u"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.cost, Cost::from("12.50"));

        let out = serde_json::to_string(&book).unwrap();
        assert!(out.contains("\"cost\":\"12.50\""));
    }

    #[test]
    fn cost_displays_without_decoration() {
        assert_eq!(Cost::from(15).to_string(), "15");
        assert_eq!(Cost::from("12.50").to_string(), "12.50");
        assert_eq!(
            Cost::Number(serde_json::Number::from_f64(19.95).unwrap()).to_string(),
            "19.95"
        );
    }
}
