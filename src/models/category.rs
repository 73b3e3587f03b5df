//! Expense category model
//!
//! A closed set of ten categories. Strict parsing is used for data files and
//! the remote store; lenient parsing (aliases, case-insensitive, fallback to
//! `Other`) is used for CSV import and AI suggestion responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Dining,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Health,
    Shopping,
    Travel,
    Other,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 10] = [
        Category::Groceries,
        Category::Dining,
        Category::Transport,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Shopping,
        Category::Travel,
        Category::Other,
    ];

    /// Canonical display name
    pub fn name(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// Strict parse: canonical name only, case-insensitive
    pub fn parse_strict(s: &str) -> Option<Category> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }

    /// Lenient parse for import and AI responses
    ///
    /// Trims surrounding whitespace, quotes, and trailing punctuation, matches
    /// canonical names case-insensitively, then falls back to a synonym table.
    /// Returns `None` only when the input matches nothing at all.
    pub fn parse_lenient(s: &str) -> Option<Category> {
        let cleaned = s
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '!')
            .trim();

        if cleaned.is_empty() {
            return None;
        }

        if let Some(cat) = Category::parse_strict(cleaned) {
            return Some(cat);
        }

        let lower = cleaned.to_lowercase();
        let alias = match lower.as_str() {
            "food" | "grocery" | "supermarket" => Category::Groceries,
            "restaurant" | "restaurants" | "eating out" | "takeout" | "coffee" => Category::Dining,
            "transportation" | "gas" | "fuel" | "car" | "commute" | "parking" => {
                Category::Transport
            }
            "rent" | "mortgage" | "home" => Category::Housing,
            "bills" | "electricity" | "water" | "internet" | "phone" => Category::Utilities,
            "fun" | "movies" | "games" | "subscriptions" => Category::Entertainment,
            "healthcare" | "medical" | "pharmacy" | "fitness" | "gym" => Category::Health,
            "clothes" | "clothing" | "retail" => Category::Shopping,
            "vacation" | "holiday" | "flights" | "hotel" => Category::Travel,
            "misc" | "miscellaneous" | "uncategorized" | "general" => Category::Other,
            _ => return None,
        };

        Some(alias)
    }

    /// Lenient parse that never fails: unknown input becomes `Other`
    pub fn parse_or_other(s: &str) -> Category {
        Category::parse_lenient(s).unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse_strict(s).ok_or_else(|| format!("Unknown category: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_ten_categories() {
        assert_eq!(Category::ALL.len(), 10);
    }

    #[test]
    fn test_strict_parse_case_insensitive() {
        assert_eq!(Category::parse_strict("groceries"), Some(Category::Groceries));
        assert_eq!(Category::parse_strict("GROCERIES"), Some(Category::Groceries));
        assert_eq!(Category::parse_strict(" Dining "), Some(Category::Dining));
        assert_eq!(Category::parse_strict("food"), None);
    }

    #[test]
    fn test_lenient_parse_aliases() {
        assert_eq!(Category::parse_lenient("food"), Some(Category::Groceries));
        assert_eq!(Category::parse_lenient("Restaurant"), Some(Category::Dining));
        assert_eq!(Category::parse_lenient("rent"), Some(Category::Housing));
        assert_eq!(Category::parse_lenient("gas"), Some(Category::Transport));
        assert_eq!(Category::parse_lenient("misc"), Some(Category::Other));
    }

    #[test]
    fn test_lenient_parse_strips_quotes_and_punctuation() {
        assert_eq!(Category::parse_lenient("\"Travel\""), Some(Category::Travel));
        assert_eq!(Category::parse_lenient("Health."), Some(Category::Health));
        assert_eq!(Category::parse_lenient("'shopping'"), Some(Category::Shopping));
    }

    #[test]
    fn test_lenient_parse_unknown() {
        assert_eq!(Category::parse_lenient("xyzzy"), None);
        assert_eq!(Category::parse_lenient(""), None);
        assert_eq!(Category::parse_or_other("xyzzy"), Category::Other);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
        let cat: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(cat, Category::Entertainment);
    }

    #[test]
    fn test_from_str_strict() {
        let cat: Category = "Utilities".parse().unwrap();
        assert_eq!(cat, Category::Utilities);
        assert!("bills".parse::<Category>().is_err());
    }
}
