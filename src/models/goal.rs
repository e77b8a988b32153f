use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A savings target the user tracks against the money freed up by trimming
/// subscriptions. `current_amount` is clamped at zero and the goal completes
/// automatically once it reaches the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    pub fn new(request: CreateGoalRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            target_amount: request.target_amount,
            current_amount: Decimal::ZERO,
            deadline: request.deadline,
            created_at: Utc::now(),
            completed: false,
        }
    }

    /// Sets the saved amount, clamped at zero. Reaching the target flips
    /// `completed`; dropping back below it does not un-complete the goal
    /// once it was explicitly completed, but a progress update recomputes
    /// the flag from the amount.
    pub fn set_progress(&mut self, amount: Decimal) {
        self.current_amount = amount.max(Decimal::ZERO);
        self.completed = self.current_amount >= self.target_amount;
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn goal(target: Decimal) -> SavingsGoal {
        SavingsGoal::new(CreateGoalRequest {
            title: "Vacances".to_string(),
            target_amount: target,
            deadline: None,
        })
    }

    #[test]
    fn progress_is_clamped_at_zero() {
        let mut g = goal(dec!(100));
        g.set_progress(dec!(-20));
        assert_eq!(g.current_amount, Decimal::ZERO);
        assert!(!g.completed);
    }

    #[test]
    fn reaching_target_completes_the_goal() {
        let mut g = goal(dec!(100));
        g.set_progress(dec!(99.99));
        assert!(!g.completed);
        g.set_progress(dec!(100));
        assert!(g.completed);
    }

    #[test]
    fn explicit_completion() {
        let mut g = goal(dec!(500));
        g.complete();
        assert!(g.completed);
        assert_eq!(g.current_amount, Decimal::ZERO);
    }
}
