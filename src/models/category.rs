//! Category model
//!
//! A category is a named budget line, either fixed (the same every month) or
//! variable. Its id is derived from the name when it is created and never
//! changes afterwards, so renaming keeps every month file pointing at it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Whether a category's spend is the same every month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Fixed,
    Variable,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for CategoryType {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            other => Err(CategoryValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub budget_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    /// Create a new category, deriving its id from the name
    pub fn new(name: impl Into<String>, category_type: CategoryType, budget_amount: Money) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
            category_type,
            budget_amount,
            color: None,
        }
    }

    /// Create a category with an explicit id
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        category_type: CategoryType,
        budget_amount: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_type,
            budget_amount,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.category_type == CategoryType::Fixed
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.id.is_empty() {
            return Err(CategoryValidationError::EmptyId);
        }

        if self.budget_amount.is_negative() {
            return Err(CategoryValidationError::NegativeBudget);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Derive an id from a display name: lowercased, whitespace runs become '-'
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    EmptyId,
    NameTooLong(usize),
    NegativeBudget,
    UnknownType(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::EmptyId => write!(f, "Category id cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeBudget => write!(f, "Budget amount cannot be negative"),
            Self::UnknownType(t) => {
                write!(f, "Unknown category type '{}', expected fixed or variable", t)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_derives_id() {
        let category = Category::new("Dining Out", CategoryType::Variable, Money::from_pounds(300));
        assert_eq!(category.id, "dining-out");
        assert_eq!(category.name, "Dining Out");
        assert!(!category.is_fixed());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rent/Mortgage"), "rent/mortgage");
        assert_eq!(slugify("  Kids   Clubs "), "kids-clubs");
        assert_eq!(slugify("Car\tInsurance"), "car-insurance");
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Groceries", CategoryType::Variable, Money::from_pounds(600));
        assert!(category.validate().is_ok());

        category.budget_amount = Money::from_pence(-1);
        assert_eq!(category.validate(), Err(CategoryValidationError::NegativeBudget));

        category.budget_amount = Money::zero();
        category.name = "   ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("Fixed".parse::<CategoryType>().unwrap(), CategoryType::Fixed);
        assert_eq!("variable".parse::<CategoryType>().unwrap(), CategoryType::Variable);
        assert!("monthly".parse::<CategoryType>().is_err());
    }

    #[test]
    fn test_serialization_shape() {
        let category = Category::with_id("rent", "Rent/Mortgage", CategoryType::Fixed, Money::from_pounds(1500))
            .with_color("#ef4444");
        let value = serde_json::to_value(&category).unwrap();

        assert_eq!(value["id"], "rent");
        assert_eq!(value["type"], "fixed");
        assert_eq!(value["budgetAmount"], 1500);
        assert_eq!(value["color"], "#ef4444");
    }

    #[test]
    fn test_color_is_optional() {
        let json = r#"{"id":"x","name":"X","type":"variable","budgetAmount":10}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.color, None);
        assert!(!serde_json::to_string(&category).unwrap().contains("color"));
    }
}
