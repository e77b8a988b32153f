use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Monthly spending budget. A single instance per user: created with
/// defaults, updated by partial merge, disabled rather than deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub monthly: Decimal,
    /// Percentage of the budget (0-100) at which the near-threshold warning fires.
    pub alert_threshold: u8,
    pub enabled: bool,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly: Decimal::ZERO,
            alert_threshold: 80,
            enabled: false,
        }
    }
}

/// Partial update applied over the current budget.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub monthly: Option<Decimal>,
    #[validate(range(min = 0, max = 100))]
    pub alert_threshold: Option<u8>,
    pub enabled: Option<bool>,
}

/// Derived spend-vs-budget summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    /// Displayed percentage, capped at 100. How far over budget the user is
    /// must be read from `remaining`.
    pub percentage: Decimal,
    /// May be negative when over budget.
    pub remaining: Decimal,
    pub spent: Decimal,
    pub is_over_budget: bool,
    /// Mutually exclusive with `is_over_budget`.
    pub is_near_threshold: bool,
    pub budget_limit: Decimal,
}

impl Budget {
    pub fn merge(&mut self, update: BudgetUpdate) {
        if let Some(monthly) = update.monthly {
            self.monthly = monthly;
        }
        if let Some(threshold) = update.alert_threshold {
            self.alert_threshold = threshold;
        }
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
    }

    /// `None` when the budget is disabled or unset (`monthly == 0`), which
    /// also guards the division below.
    pub fn calculate_usage(&self, spent: Decimal) -> Option<BudgetUsage> {
        if !self.enabled || self.monthly.is_zero() {
            return None;
        }

        let percentage = (spent / self.monthly * Decimal::ONE_HUNDRED).round_dp(2);
        let remaining = self.monthly - spent;
        let is_over_budget = spent > self.monthly;
        let is_near_threshold =
            percentage >= Decimal::from(self.alert_threshold) && !is_over_budget;

        Some(BudgetUsage {
            percentage: percentage.min(Decimal::ONE_HUNDRED),
            remaining,
            spent,
            is_over_budget,
            is_near_threshold,
            budget_limit: self.monthly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn enabled_budget(monthly: Decimal, threshold: u8) -> Budget {
        Budget {
            monthly,
            alert_threshold: threshold,
            enabled: true,
        }
    }

    #[test]
    fn usage_is_none_when_disabled_or_zero() {
        let disabled = Budget::default();
        assert!(disabled.calculate_usage(dec!(50)).is_none());

        let zero = enabled_budget(Decimal::ZERO, 80);
        assert!(zero.calculate_usage(dec!(50)).is_none());
    }

    #[test]
    fn threshold_boundary_at_eighty_percent() {
        let budget = enabled_budget(dec!(100), 80);

        let below = budget.calculate_usage(dec!(79)).unwrap();
        assert!(!below.is_near_threshold);
        assert!(!below.is_over_budget);

        let at = budget.calculate_usage(dec!(80)).unwrap();
        assert!(at.is_near_threshold);
        assert!(!at.is_over_budget);
    }

    #[test]
    fn over_budget_excludes_near_threshold() {
        let budget = enabled_budget(dec!(100), 80);
        let usage = budget.calculate_usage(dec!(101)).unwrap();
        assert!(usage.is_over_budget);
        assert!(!usage.is_near_threshold);
        assert_eq!(usage.percentage, dec!(100));
        assert_eq!(usage.remaining, dec!(-1));
    }

    #[test]
    fn merge_is_partial() {
        let mut budget = Budget::default();
        budget.merge(BudgetUpdate {
            monthly: Some(dec!(45.50)),
            alert_threshold: None,
            enabled: Some(true),
        });
        assert_eq!(budget.monthly, dec!(45.50));
        assert_eq!(budget.alert_threshold, 80);
        assert!(budget.enabled);
    }
}
