//! Savings goal planning

use chrono::NaiveDate;

use crate::models::SavingsGoal;

/// Days per planning month when spreading the remaining amount
const DAYS_PER_MONTH: f64 = 30.0;

/// Saved amount as a percentage of the target (0 for a non-positive target)
pub fn progress_percent(goal: &SavingsGoal) -> f64 {
    if goal.target_amount > 0.0 {
        goal.current_amount / goal.target_amount * 100.0
    } else {
        0.0
    }
}

/// Amount still to save; never negative
pub fn remaining(goal: &SavingsGoal) -> f64 {
    (goal.target_amount - goal.current_amount).max(0.0)
}

/// Days from `today` until the deadline; negative once it has passed
pub fn days_left(goal: &SavingsGoal, today: NaiveDate) -> i64 {
    (goal.deadline - today).num_days()
}

/// Amount to set aside each month to reach the target by the deadline
///
/// Months are counted as 30-day blocks, rounded up and never less than one,
/// so an overdue goal asks for the whole remainder now.
pub fn monthly_required(goal: &SavingsGoal, today: NaiveDate) -> f64 {
    let months = (days_left(goal, today) as f64 / DAYS_PER_MONTH).ceil().max(1.0);
    remaining(goal) / months
}

pub fn is_complete(goal: &SavingsGoal) -> bool {
    goal.current_amount >= goal.target_amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::goal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_progress() {
        let g = goal("Emergency Fund", 10000.0, 3500.0, date(2026, 12, 31));
        assert_eq!(progress_percent(&g), 35.0);
        assert_eq!(remaining(&g), 6500.0);
        assert!(!is_complete(&g));

        let zero = goal("Nothing", 0.0, 10.0, date(2026, 12, 31));
        assert_eq!(progress_percent(&zero), 0.0);
    }

    #[test]
    fn test_overfunded_goal() {
        let g = goal("Bike", 800.0, 900.0, date(2026, 12, 31));
        assert_eq!(remaining(&g), 0.0);
        assert!(is_complete(&g));
        assert_eq!(monthly_required(&g, date(2026, 3, 1)), 0.0);
    }

    #[test]
    fn test_monthly_required() {
        // 90 days out: three 30-day months
        let g = goal("Vacation", 5000.0, 2000.0, date(2026, 6, 1));
        let today = date(2026, 3, 3);
        assert_eq!(days_left(&g, today), 90);
        assert_eq!(monthly_required(&g, today), 1000.0);

        // 91 days rounds up to four months
        assert_eq!(monthly_required(&g, date(2026, 3, 2)), 750.0);
    }

    #[test]
    fn test_overdue_goal() {
        let g = goal("Vacation", 5000.0, 2000.0, date(2026, 3, 1));
        let today = date(2026, 3, 11);
        assert_eq!(days_left(&g, today), -10);
        assert_eq!(monthly_required(&g, today), 3000.0);
    }
}
