use std::collections::BTreeMap;

use db::models::budget_item::BudgetItem;
use serde::Serialize;
use ts_rs::TS;

const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct CategoryTotal {
    pub category: String,
    pub planned: f64,
    pub spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct BudgetSummary {
    pub budget: f64,
    pub total_planned: f64,
    pub total_spent: f64,
    /// Project budget minus everything spent so far; negative when overspent.
    pub remaining: f64,
    pub over_budget: bool,
    pub categories: Vec<CategoryTotal>,
}

impl BudgetSummary {
    pub fn aggregate(budget: f64, items: &[BudgetItem]) -> Self {
        let mut by_category: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        for item in items {
            let category = match item.category.trim() {
                "" => UNCATEGORIZED,
                category => category,
            };
            let entry = by_category.entry(category).or_default();
            entry.0 += item.planned_amount;
            entry.1 += item.spent_amount;
        }

        let total_planned = items.iter().map(|item| item.planned_amount).sum();
        let total_spent: f64 = items.iter().map(|item| item.spent_amount).sum();

        Self {
            budget,
            total_planned,
            total_spent,
            remaining: budget - total_spent,
            over_budget: total_spent > budget,
            categories: by_category
                .into_iter()
                .map(|(category, (planned, spent))| CategoryTotal {
                    category: category.to_string(),
                    planned,
                    spent,
                })
                .collect(),
        }
    }
}
