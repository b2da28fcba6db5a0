//! Planned-load statistics for a generated plan, overall and per week.

use crate::MonthlyPlan;
use serde::{Deserialize, Serialize};

/// Totals for one 7-day block of a plan
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WeekSummary {
    /// 1-based; week 1 covers days 1-7
    pub week_number: u32,
    pub days: u32,
    pub exercise_days: u32,
    pub exercise_minutes: u32,
    pub calories_burned: i32,
    pub meal_calories: i32,
}

/// Totals across a whole plan
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub total_days: u32,
    pub exercise_days: u32,
    pub rest_days: u32,
    pub total_exercise_minutes: u32,
    pub total_calories_burned: i32,
    pub total_meal_calories: i32,
    pub weeks: Vec<WeekSummary>,
}

pub fn summarize_plan(plan: &MonthlyPlan) -> PlanSummary {
    let mut summary = PlanSummary::default();

    for day in &plan.daily_plans {
        let week_number = (day.day_number - 1) / 7 + 1;
        if summary.weeks.last().map(|w| w.week_number) != Some(week_number) {
            summary.weeks.push(WeekSummary {
                week_number,
                ..WeekSummary::default()
            });
        }
        let Some(week) = summary.weeks.last_mut() else {
            continue;
        };

        let meal_calories = day.total_calories();
        week.days += 1;
        week.meal_calories = week.meal_calories.saturating_add(meal_calories);
        summary.total_days += 1;
        summary.total_meal_calories = summary.total_meal_calories.saturating_add(meal_calories);

        match &day.exercise {
            Some(exercise) => {
                week.exercise_days += 1;
                week.exercise_minutes =
                    week.exercise_minutes.saturating_add(exercise.duration_minutes);
                week.calories_burned =
                    week.calories_burned.saturating_add(exercise.calories_burned);
                summary.exercise_days += 1;
                summary.total_exercise_minutes =
                    summary.total_exercise_minutes.saturating_add(exercise.duration_minutes);
                summary.total_calories_burned =
                    summary.total_calories_burned.saturating_add(exercise.calories_burned);
            }
            None => summary.rest_days += 1,
        }
    }

    tracing::debug!(
        "Plan summary: {} days, {} exercise days, {} min",
        summary.total_days,
        summary.exercise_days,
        summary.total_exercise_minutes
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use crate::config::EngineConfig;
    use crate::engine::PlanningEngine;
    use crate::HealthReport;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plan() -> MonthlyPlan {
        let engine = PlanningEngine::new(get_default_catalog(), &EngineConfig::default());
        let mut report = HealthReport::new(172.0, 68.0);
        report.exercise_frequency = Some(3);
        engine
            .monthly_plan(&report, "2024-09", 30, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap()
    }

    #[test]
    fn test_rest_and_exercise_days() {
        let plan = plan();
        let summary = summarize_plan(&plan);

        assert_eq!(summary.total_days, 30);
        assert_eq!(summary.rest_days, 4);
        assert_eq!(summary.exercise_days, 26);
        // active level: 45 minutes per session
        assert_eq!(summary.total_exercise_minutes, 26 * 45);
    }

    #[test]
    fn test_weekly_breakdown() {
        let plan = plan();
        let summary = summarize_plan(&plan);

        assert_eq!(summary.weeks.len(), 5);
        assert_eq!(summary.weeks[0].days, 7);
        assert_eq!(summary.weeks[0].exercise_days, 6);
        assert_eq!(summary.weeks[4].week_number, 5);
        assert_eq!(summary.weeks[4].days, 2);

        let week_total: i32 = summary.weeks.iter().map(|w| w.meal_calories).sum();
        assert_eq!(week_total, summary.total_meal_calories);
        let day_total: i32 = plan.daily_plans.iter().map(|d| d.total_calories()).sum();
        assert_eq!(day_total, summary.total_meal_calories);
    }

    #[test]
    fn test_burned_totals_saturate() {
        let mut plan = plan();
        for day in &mut plan.daily_plans {
            if let Some(exercise) = day.exercise.as_mut() {
                exercise.calories_burned = i32::MAX;
            }
        }

        let summary = summarize_plan(&plan);
        assert_eq!(summary.total_calories_burned, i32::MAX);
        assert!(summary.weeks.iter().all(|w| w.calories_burned == i32::MAX));
        assert_eq!(summary.exercise_days, 26);
    }
}
