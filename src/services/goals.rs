use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::goal::{CreateGoalRequest, SavingsGoal};
use crate::services::storage::{self, StorageBackend, StoreError};

const GOALS_KEY: &str = "subscription-goals";

pub struct GoalsStore {
    backend: Arc<dyn StorageBackend>,
    goals: RwLock<Vec<SavingsGoal>>,
}

impl GoalsStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let goals = storage::load_or_default(backend.as_ref(), GOALS_KEY);
        Self {
            backend,
            goals: RwLock::new(goals),
        }
    }

    pub fn list(&self) -> Vec<SavingsGoal> {
        self.goals.read().unwrap().clone()
    }

    pub fn active(&self) -> Vec<SavingsGoal> {
        self.goals
            .read()
            .unwrap()
            .iter()
            .filter(|g| !g.completed)
            .cloned()
            .collect()
    }

    pub fn completed(&self) -> Vec<SavingsGoal> {
        self.goals
            .read()
            .unwrap()
            .iter()
            .filter(|g| g.completed)
            .cloned()
            .collect()
    }

    pub fn add(&self, request: CreateGoalRequest) -> Result<SavingsGoal, StoreError> {
        let goal = SavingsGoal::new(request);
        let mut goals = self.goals.write().unwrap();
        goals.push(goal.clone());
        storage::save(self.backend.as_ref(), GOALS_KEY, &*goals)?;
        Ok(goal)
    }

    /// Sets the saved amount of a goal. Returns the updated goal, or `None`
    /// for an unknown id.
    pub fn set_progress(
        &self,
        goal_id: Uuid,
        amount: Decimal,
    ) -> Result<Option<SavingsGoal>, StoreError> {
        let mut goals = self.goals.write().unwrap();
        let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) else {
            return Ok(None);
        };
        goal.set_progress(amount);
        let updated = goal.clone();
        storage::save(self.backend.as_ref(), GOALS_KEY, &*goals)?;
        Ok(Some(updated))
    }

    pub fn complete(&self, goal_id: Uuid) -> Result<Option<SavingsGoal>, StoreError> {
        let mut goals = self.goals.write().unwrap();
        let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) else {
            return Ok(None);
        };
        goal.complete();
        let updated = goal.clone();
        storage::save(self.backend.as_ref(), GOALS_KEY, &*goals)?;
        Ok(Some(updated))
    }

    pub fn delete(&self, goal_id: Uuid) -> Result<bool, StoreError> {
        let mut goals = self.goals.write().unwrap();
        let before = goals.len();
        goals.retain(|g| g.id != goal_id);
        let removed = goals.len() != before;
        storage::save(self.backend.as_ref(), GOALS_KEY, &*goals)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStorage;
    use rust_decimal_macros::dec;

    fn store() -> GoalsStore {
        GoalsStore::new(Arc::new(MemoryStorage::new()))
    }

    fn request(title: &str, target: Decimal) -> CreateGoalRequest {
        CreateGoalRequest {
            title: title.to_string(),
            target_amount: target,
            deadline: None,
        }
    }

    #[test]
    fn progress_moves_goal_between_views() {
        let s = store();
        let goal = s.add(request("Console", dec!(400))).unwrap();
        assert_eq!(s.active().len(), 1);

        s.set_progress(goal.id, dec!(400)).unwrap();
        assert!(s.active().is_empty());
        assert_eq!(s.completed().len(), 1);
    }

    #[test]
    fn unknown_goal_is_a_soft_miss() {
        let s = store();
        assert!(s.set_progress(Uuid::new_v4(), dec!(10)).unwrap().is_none());
        assert!(!s.delete(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn goals_round_trip_through_storage() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let id = {
            let s = GoalsStore::new(backend.clone());
            s.add(request("Vacances", dec!(1200))).unwrap().id
        };
        let reloaded = GoalsStore::new(backend);
        let goals = reloaded.list();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].id, id);
        assert_eq!(goals[0].target_amount, dec!(1200));
    }
}
