//! Planning engine turning a health report into daily and monthly plans.
//!
//! Pipeline:
//! - Analyse the report (BMI, BMR, calorie target, warnings)
//! - Derive the shared nutrition target
//! - Per day: pick meals, pick an exercise (or rest), write reminders
//! - Aggregate the days into a monthly plan
//!
//! All random choices go through the caller's `RngCore`, so a seeded
//! generator reproduces a plan exactly.

use crate::catalog::{Catalog, MealOption};
use crate::config::EngineConfig;
use crate::rules;
use crate::{
    CalorieTier, DailyPlan, Error, ExercisePlan, ExerciseType, HealthAnalysis, HealthGoal,
    HealthReport, MealSuggestion, MealType, MonthlyPlan, NutritionTarget, Result,
};
use chrono::{Duration, NaiveDate};
use rand::seq::IndexedRandom;
use rand::RngCore;

/// Food keywords removed for vegetarians (meat, chicken, egg, shrimp, fish)
const NON_VEGETARIAN_KEYWORDS: [&str; 5] = ["肉", "鸡", "蛋", "虾", "鱼"];

/// Meals selected for one day
#[derive(Clone, Debug, Default)]
pub struct DayMeals {
    pub breakfast: Option<MealSuggestion>,
    pub lunch: Option<MealSuggestion>,
    pub dinner: Option<MealSuggestion>,
    pub snack: Option<MealSuggestion>,
}

/// Reminder and note text for one day
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayMessages {
    pub reminders: Vec<String>,
    pub notes: Vec<String>,
}

/// Plan generator bound to a catalog and engine settings
#[derive(Clone, Debug)]
pub struct PlanningEngine<'c> {
    catalog: &'c Catalog,
    assumed_age: u32,
}

impl<'c> PlanningEngine<'c> {
    pub fn new(catalog: &'c Catalog, settings: &EngineConfig) -> Self {
        Self {
            catalog,
            assumed_age: settings.assumed_age,
        }
    }

    /// Analyse a report: BMI, BMR, activity level, calorie and macro targets,
    /// and safety warnings
    pub fn analyze(&self, report: &HealthReport) -> HealthAnalysis {
        let bmi = report.bmi();
        let activity_level = report.activity_level();

        let bmr = rules::calculate_bmr(report.weight, report.height, self.assumed_age, report.gender);
        let base_calories = rules::calculate_daily_calories(bmr, activity_level);
        let target_calories = rules::adjust_calories_for_goal(base_calories, report.health_goal);

        tracing::debug!(
            "Analysis: bmi={} bmr={} activity={:?} base={} target={}",
            bmi,
            bmr,
            activity_level,
            base_calories,
            target_calories
        );

        HealthAnalysis {
            bmi,
            bmi_category: report.bmi_category(),
            bmr,
            activity_level,
            target_calories,
            nutrient_targets: rules::calculate_nutrient_targets(target_calories),
            warnings: rules::health_warnings(report),
            health_goal: report.health_goal,
        }
    }

    /// Pick the day's meals
    ///
    /// Breakfast, lunch and snack follow the calorie tier of the daily target;
    /// dinner always comes from the low tier. The snack appears every third day.
    pub fn meal_suggestions(
        &self,
        report: &HealthReport,
        target: &NutritionTarget,
        day_number: u32,
        rng: &mut dyn RngCore,
    ) -> DayMeals {
        let tier = CalorieTier::from_daily_calories(target.daily_calories);

        let mut suggest = |meal: MealType, tier: CalorieTier| {
            self.catalog
                .meal_options(meal, tier)
                .choose(&mut *rng)
                .map(|option| build_meal(meal, option, report, target))
        };

        let breakfast = suggest(MealType::Breakfast, tier);
        let lunch = suggest(MealType::Lunch, tier);
        let dinner = suggest(MealType::Dinner, CalorieTier::Low);
        let snack = if day_number % 3 == 0 {
            suggest(MealType::Snack, tier)
        } else {
            None
        };

        DayMeals {
            breakfast,
            lunch,
            dinner,
            snack,
        }
    }

    /// Pick the day's exercise, or None on the weekly rest day
    pub fn exercise_plan(
        &self,
        report: &HealthReport,
        day_number: u32,
        rng: &mut dyn RngCore,
    ) -> Option<ExercisePlan> {
        let day_in_week = day_number % 7;
        if day_in_week == rules::REST_DAY_POSITION {
            tracing::debug!("Day {} is a rest day", day_number);
            return None;
        }

        let recommendation = rules::exercise_recommendation(report.activity_level());
        let exercise_type =
            rules::WEEKLY_ROTATION[day_in_week as usize % rules::WEEKLY_ROTATION.len()];
        let intensity = recommendation.intensity;

        let Some(template) = self
            .catalog
            .exercise_templates(exercise_type, intensity)
            .choose(&mut *rng)
        else {
            tracing::warn!(
                "No {:?} template at {:?} intensity, leaving day {} without exercise",
                exercise_type,
                intensity,
                day_number
            );
            return None;
        };

        let duration_minutes =
            recommendation.duration_minutes + rules::goal_duration_bonus(report.health_goal);
        let calories_burned =
            rules::estimate_calories_burned(exercise_type, duration_minutes, report.weight, intensity);

        Some(ExercisePlan {
            exercise_type,
            exercise_name: template.name.clone(),
            description: template.description.clone(),
            duration_minutes,
            intensity,
            calories_burned,
            instructions: template.instructions.clone(),
        })
    }

    /// Assemble one day's plan
    pub fn daily_plan(
        &self,
        report: &HealthReport,
        target: &NutritionTarget,
        day_number: u32,
        date: NaiveDate,
        rng: &mut dyn RngCore,
    ) -> DailyPlan {
        let meals = self.meal_suggestions(report, target, day_number, rng);
        let exercise = self.exercise_plan(report, day_number, rng);
        let messages = reminders_and_notes(report, day_number, exercise.as_ref());

        DailyPlan {
            day_number,
            date,
            breakfast: meals.breakfast,
            lunch: meals.lunch,
            dinner: meals.dinner,
            snack: meals.snack,
            exercise,
            reminders: messages.reminders,
            notes: messages.notes,
        }
    }

    /// Generate a plan of `total_days` consecutive days starting on the first
    /// of `plan_month` (`YYYY-MM`)
    pub fn monthly_plan(
        &self,
        report: &HealthReport,
        plan_month: &str,
        total_days: u32,
        rng: &mut dyn RngCore,
    ) -> Result<MonthlyPlan> {
        let start = parse_plan_month(plan_month)?;
        let analysis = self.analyze(report);
        let nutrition_target = NutritionTarget::from(&analysis);
        let recommendation = rules::exercise_recommendation(analysis.activity_level);

        tracing::info!(
            "Generating {}-day plan for user {} starting {} ({} kcal/day)",
            total_days,
            report.user_id,
            start,
            nutrition_target.daily_calories
        );

        let daily_plans = (1..=total_days)
            .map(|day_number| {
                let date = start + Duration::days(i64::from(day_number - 1));
                self.daily_plan(report, &nutrition_target, day_number, date, rng)
            })
            .collect();

        Ok(MonthlyPlan {
            user_id: report.user_id,
            plan_month: plan_month.to_string(),
            nutrition_target,
            exercise_sessions_per_week: recommendation.sessions_per_week,
            daily_plans,
        })
    }
}

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_plan_month(plan_month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", plan_month.trim()), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("plan month {:?}: {}", plan_month, e)))
}

fn build_meal(
    meal: MealType,
    option: &MealOption,
    report: &HealthReport,
    target: &NutritionTarget,
) -> MealSuggestion {
    let food_items = filter_foods(
        &option.foods,
        report.dietary_preferences.as_deref(),
        report.food_allergies.as_deref(),
    );

    MealSuggestion {
        meal_type: meal,
        description: food_items.join(", "),
        food_items,
        calories: option.calories,
        protein: option.protein,
        carbs: option.carbs,
        fat: option.fat,
        preparation_tips: Some(preparation_tip(meal).to_string()),
        calorie_budget: rules::meal_calorie_budget(target.daily_calories, meal),
    }
}

fn preparation_tip(meal: MealType) -> &'static str {
    match meal {
        MealType::Breakfast => "建议在早餐后30分钟内食用，保证营养吸收",
        MealType::Lunch => "午饭后适当休息，避免立即剧烈运动",
        MealType::Dinner => "晚餐宜清淡，睡前2小时完成用餐",
        MealType::Snack => "选择下午或上午补充能量",
    }
}

fn is_vegetarian(preferences: &str) -> bool {
    preferences.contains("素食") || preferences.to_lowercase().contains("vegetarian")
}

/// Drop foods that clash with a vegetarian preference or a listed allergen
///
/// Allergens are comma separated and matched as raw substrings.
pub fn filter_foods(foods: &[String], preferences: Option<&str>, allergies: Option<&str>) -> Vec<String> {
    let vegetarian = preferences.is_some_and(is_vegetarian);
    let allergens: Vec<&str> = allergies
        .map(|a| a.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    foods
        .iter()
        .filter(|food| !(vegetarian && NON_VEGETARIAN_KEYWORDS.iter().any(|k| food.contains(k))))
        .filter(|food| !allergens.iter().any(|a| food.contains(a)))
        .cloned()
        .collect()
}

/// Build the day's reminders and notes
pub fn reminders_and_notes(
    report: &HealthReport,
    day_number: u32,
    exercise: Option<&ExercisePlan>,
) -> DayMessages {
    let mut messages = DayMessages::default();

    if day_number == 1 {
        messages.reminders.push("今天是计划开始的第一天，加油！".into());
        messages.reminders.push("记得记录今日的饮食和运动情况".into());
    } else if day_number % 7 == 0 {
        messages.reminders.push("恭喜您坚持了一周！继续保持！".into());
    } else if let Some(plan) = exercise {
        messages.reminders.push(format!(
            "今日运动：{}，时长{}分钟",
            plan.exercise_name, plan.duration_minutes
        ));
    }

    match report.health_goal {
        HealthGoal::LoseWeight if day_number % 3 == 0 => {
            messages.reminders.push("记得记录体重，追踪减重进度".into());
            messages.notes.push("控制碳水化合物摄入，增加蛋白质比例".into());
        }
        HealthGoal::BuildMuscle if day_number % 2 == 0 => {
            messages.reminders.push("今天记得摄入足够的蛋白质".into());
            messages.notes.push("运动后30分钟内补充营养，帮助肌肉恢复".into());
        }
        _ => {}
    }

    if report.reported_sleep_hours().is_some_and(|h| h < 7.0) {
        messages.notes.push("您的睡眠时间偏少，建议今晚提前30分钟入睡".into());
    }

    if day_number % 2 == 0 {
        messages.reminders.push("记得保持充足的水分摄入，每天至少8杯水".into());
    }

    if report.stress_level.is_some_and(|s| s > 7) {
        messages.notes.push("检测到近期压力较大，建议适当进行放松活动".into());
        if exercise.is_some_and(|e| e.exercise_type == ExerciseType::Flexibility) {
            messages.reminders.push("今天的柔韧性训练有助于缓解压力".into());
        }
    }

    messages
}
