use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error};
use rust_decimal::Decimal;

use super::CategorySummary;
use crate::categories::{Category, CategoryRepositoryTrait};
use crate::errors::Result;
use crate::expenses::ExpenseRepositoryTrait;
use crate::utils::money::checked_sub;
use crate::utils::month::MonthKey;

/// Trait defining the contract for the summary service
pub trait SummaryServiceTrait: Send + Sync {
    fn get_monthly_summary(&self, user_id: &str, month: &str) -> Result<Vec<CategorySummary>>;
}

pub struct SummaryService {
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl SummaryService {
    pub fn new(
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        SummaryService {
            category_repository,
            expense_repository,
        }
    }
}

impl SummaryServiceTrait for SummaryService {
    fn get_monthly_summary(&self, user_id: &str, month: &str) -> Result<Vec<CategorySummary>> {
        let month = MonthKey::parse(month)?;
        let month_str = month.to_string();
        debug!("Building {} summary for user {}", month_str, user_id);

        let categories = self
            .category_repository
            .list_categories(user_id, Some(&month_str))
            .map_err(|e| {
                error!("Error loading categories for {}: {}", month_str, e);
                e
            })?;

        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let spend = self
            .expense_repository
            .sum_spend_by_category(user_id, &month.range())
            .map_err(|e| {
                error!("Error aggregating spend for {}: {}", month_str, e);
                e
            })?;

        summarize(categories, &spend)
    }
}

/// Pairs each category with its summed spend, keeping category order.
pub fn summarize(
    categories: Vec<Category>,
    spend_by_category: &HashMap<String, Decimal>,
) -> Result<Vec<CategorySummary>> {
    categories
        .into_iter()
        .map(|category| {
            let spent = spend_by_category
                .get(&category.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            Ok(CategorySummary {
                remaining: checked_sub(category.limit, spent)?,
                over_budget: spent > category.limit,
                spent,
                limit: category.limit,
                id: category.id,
                name: category.name,
                color: category.color,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::NewCategory;
    use crate::expenses::{ExpenseInput, ExpenseService, ExpenseServiceTrait};
    use crate::test_support::{at, category_fixture, InMemoryBudgetStore};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    async fn add_category(
        store: &Arc<InMemoryBudgetStore>,
        user_id: &str,
        name: &str,
        limit: Decimal,
        month: &str,
    ) -> Category {
        store
            .insert_category(NewCategory {
                user_id: user_id.to_string(),
                name: name.to_string(),
                color: "#0ea5e9".to_string(),
                limit,
                month: month.to_string(),
            })
            .await
            .unwrap()
    }

    #[test]
    fn summarize_defaults_missing_spend_to_zero() {
        let categories = vec![category_fixture("c1", dec!(50)), category_fixture("c2", dec!(20))];
        let spend = HashMap::from([("c2".to_string(), dec!(25))]);

        let summary = summarize(categories, &spend).unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].id, "c1");
        assert_eq!(summary[0].spent, Decimal::ZERO);
        assert_eq!(summary[0].remaining, dec!(50));
        assert!(!summary[0].over_budget);
        assert_eq!(summary[1].spent, dec!(25));
        assert_eq!(summary[1].remaining, dec!(-5));
        assert!(summary[1].over_budget);
    }

    #[test]
    fn unrepresentable_remaining_is_an_error_not_a_panic() {
        let spend = HashMap::from([("c1".to_string(), Decimal::MAX)]);
        let err = summarize(vec![category_fixture("c1", Decimal::MIN)], &spend).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::Error::Validation(crate::errors::ValidationError::OutOfRange(_))
        ));
    }

    #[test]
    fn empty_month_yields_empty_summary() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let svc = SummaryService::new(store.clone(), store.clone());
        assert!(svc.get_monthly_summary("alice", "2025-06").unwrap().is_empty());
    }

    #[test]
    fn malformed_month_is_rejected() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let svc = SummaryService::new(store.clone(), store.clone());
        assert!(svc.get_monthly_summary("alice", "June").is_err());
    }

    #[tokio::test]
    async fn monthly_scenario_goes_over_budget() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let category = add_category(&store, "alice", "Travel", dec!(1000), "2025-06").await;
        let expenses = ExpenseService::new(store.clone(), store.clone());
        let summary = SummaryService::new(store.clone(), store.clone());

        expenses
            .add_expense(
                "alice",
                ExpenseInput {
                    category_id: category.id.clone(),
                    amount: dec!(600),
                    date: Some(at(2025, 6, 10)),
                },
            )
            .await
            .unwrap();
        let after_first = summary.get_monthly_summary("alice", "2025-06").unwrap();
        assert_eq!(after_first[0].spent, dec!(600));
        assert!(!after_first[0].over_budget);

        expenses
            .add_expense(
                "alice",
                ExpenseInput {
                    category_id: category.id.clone(),
                    amount: dec!(500),
                    date: Some(at(2025, 6, 11)),
                },
            )
            .await
            .unwrap();
        let after_second = summary.get_monthly_summary("alice", "2025-06").unwrap();
        assert_eq!(after_second[0].spent, dec!(1100));
        assert_eq!(after_second[0].remaining, dec!(-100));
        assert!(after_second[0].over_budget);
    }

    #[tokio::test]
    async fn summary_is_scoped_to_owner_and_month_window() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let food = add_category(&store, "alice", "Food", dec!(300), "2025-06").await;
        let fun = add_category(&store, "alice", "Fun", dec!(100), "2025-06").await;
        add_category(&store, "alice", "Food", dec!(300), "2025-07").await;
        add_category(&store, "bob", "Food", dec!(300), "2025-06").await;

        store.push_expense("alice", &food.id, dec!(40), at(2025, 6, 1));
        store.push_expense("alice", &food.id, dec!(60), at(2025, 6, 30));
        // first instant of July is outside June
        store.push_expense("alice", &food.id, dec!(999), at(2025, 7, 1));
        store.push_expense("alice", &food.id, dec!(999), at(2025, 5, 31));

        let svc = SummaryService::new(store.clone(), store.clone());
        let summary = svc.get_monthly_summary("alice", "2025-06").unwrap();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].id, food.id);
        assert_eq!(summary[0].spent, dec!(100));
        assert_eq!(summary[0].remaining, dec!(200));
        assert_eq!(summary[1].id, fun.id);
        assert_eq!(summary[1].spent, Decimal::ZERO);
        assert!(!summary[1].over_budget);
    }

    proptest! {
        #[test]
        fn remaining_and_status_follow_limit_and_spend(
            limit_cents in 1i64..10_000_000,
            amounts in prop::collection::vec(1i64..1_000_000, 0..20),
        ) {
            let limit = Decimal::new(limit_cents, 2);
            let spent: Decimal = amounts.iter().map(|c| Decimal::new(*c, 2)).sum();
            let mut spend = HashMap::new();
            if !amounts.is_empty() {
                spend.insert("c1".to_string(), spent);
            }

            let summary = summarize(vec![category_fixture("c1", limit)], &spend).unwrap();

            prop_assert_eq!(summary.len(), 1);
            prop_assert_eq!(summary[0].spent, spent);
            prop_assert_eq!(summary[0].remaining, limit - spent);
            prop_assert_eq!(summary[0].over_budget, spent > limit);
        }
    }
}
