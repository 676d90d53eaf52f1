use crate::models::Habit;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HabitProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

pub fn progress_for_habit(habit: &Habit, dates: &[NaiveDate]) -> HabitProgress {
    let completed = dates
        .iter()
        .filter(|date| habit.is_completed_on(**date))
        .count();
    HabitProgress {
        completed,
        total: dates.len(),
        percentage: percent(completed, dates.len()),
    }
}

pub fn daily_progress(habits: &[Habit], date: NaiveDate) -> u32 {
    let completed = habits
        .iter()
        .filter(|habit| habit.is_completed_on(date))
        .count();
    percent(completed, habits.len())
}

pub fn total_completions(habits: &[Habit]) -> usize {
    habits.iter().map(|habit| habit.completed_days.len()).sum()
}

fn percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}
