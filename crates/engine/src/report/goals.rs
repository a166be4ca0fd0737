use chrono::NaiveDate;

use crate::SavingsGoal;

/// Progress of a savings goal towards its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalProgress {
    /// Funded share of the target, clamped to 100.
    pub percentage: f64,
    /// Signed whole days until the deadline; negative means overdue by that
    /// many days. `None` when the goal has no deadline.
    pub days_remaining: Option<i64>,
}

pub fn goal_progress(goal: &SavingsGoal, today: NaiveDate) -> GoalProgress {
    let percentage = (goal.current.to_f64() / goal.target.to_f64() * 100.0).min(100.0);
    let days_remaining = goal
        .deadline
        .map(|deadline| (deadline - today).num_days());

    GoalProgress {
        percentage,
        days_remaining,
    }
}
