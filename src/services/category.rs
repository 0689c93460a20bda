//! Category service
//!
//! Business logic for category management. Categories live in the
//! configuration in display order.

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryType, Money};
use crate::storage::BudgetStore;

use super::update_config;

/// Changes to an existing category; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub category_type: Option<CategoryType>,
    pub budget_amount: Option<Money>,
    pub color: Option<String>,
}

/// Service for category management
pub struct CategoryService<'a> {
    store: &'a dyn BudgetStore,
}

impl<'a> CategoryService<'a> {
    pub fn new(store: &'a dyn BudgetStore) -> Self {
        Self { store }
    }

    /// All categories in display order
    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        Ok(self.store.load_config()?.categories)
    }

    /// Find a category by id, or by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> BudgetResult<Category> {
        let categories = self.list()?;
        categories
            .iter()
            .find(|c| c.id == identifier)
            .or_else(|| {
                categories
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(identifier))
            })
            .cloned()
            .ok_or_else(|| BudgetError::category_not_found(identifier))
    }

    /// Append a new category; its id is derived from the name
    pub fn add(
        &self,
        name: &str,
        category_type: CategoryType,
        budget_amount: Money,
        color: Option<String>,
    ) -> BudgetResult<Category> {
        let mut category = Category::new(name.trim(), category_type, budget_amount);
        category.color = color;
        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        update_config(self.store, |config| {
            if config.category(&category.id).is_some() {
                return Err(BudgetError::Duplicate {
                    entity_type: "Category",
                    identifier: category.id.clone(),
                });
            }
            debug!(category = %category.id, "Adding category");
            config.categories.push(category.clone());
            Ok(category)
        })
    }

    /// Apply changes to a category; the id never changes
    pub fn update(&self, id: &str, update: CategoryUpdate) -> BudgetResult<Category> {
        update_config(self.store, |config| {
            let category = config
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| BudgetError::category_not_found(id))?;

            let mut changed = category.clone();
            if let Some(name) = update.name {
                changed.name = name.trim().to_string();
            }
            if let Some(category_type) = update.category_type {
                changed.category_type = category_type;
            }
            if let Some(budget_amount) = update.budget_amount {
                changed.budget_amount = budget_amount;
            }
            if let Some(color) = update.color {
                changed.color = Some(color);
            }

            changed
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;
            *category = changed.clone();
            Ok(changed)
        })
    }

    /// Remove a category
    ///
    /// Recorded expenses for it stay in their month files but no longer count.
    pub fn remove(&self, id: &str) -> BudgetResult<Category> {
        update_config(self.store, |config| {
            let index = config
                .categories
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| BudgetError::category_not_found(id))?;
            Ok(config.categories.remove(index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_add_category() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);

        let category = service
            .add("  Kids Clubs ", CategoryType::Variable, Money::from_pounds(80), None)
            .unwrap();
        assert_eq!(category.id, "kids-clubs");
        assert_eq!(category.name, "Kids Clubs");

        let categories = service.list().unwrap();
        assert_eq!(categories.len(), 9);
        assert_eq!(categories.last().unwrap().id, "kids-clubs");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);

        let err = service
            .add("Groceries", CategoryType::Variable, Money::from_pounds(1), None)
            .unwrap_err();
        assert!(matches!(err, BudgetError::Duplicate { .. }));
        assert_eq!(service.list().unwrap().len(), 8);
    }

    #[test]
    fn test_add_invalid_rejected() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);

        assert!(service
            .add("   ", CategoryType::Fixed, Money::zero(), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .add("Holiday", CategoryType::Variable, Money::from_pence(-1), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_update_keeps_id() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);

        let updated = service
            .update(
                "groceries",
                CategoryUpdate {
                    name: Some("Food".into()),
                    budget_amount: Some(Money::from_pounds(650)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, "groceries");
        assert_eq!(updated.name, "Food");
        assert_eq!(service.find("food").unwrap().budget_amount, Money::from_pounds(650));
    }

    #[test]
    fn test_update_and_remove_missing() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);

        assert!(service
            .update("boat", CategoryUpdate::default())
            .unwrap_err()
            .is_not_found());
        assert!(service.remove("boat").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_category() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);

        let removed = service.remove("dining").unwrap();
        assert_eq!(removed.name, "Dining Out");
        assert!(service.find("dining").is_err());
        assert_eq!(service.list().unwrap().len(), 7);
    }
}
