//! Static rule tables for nutrition, exercise and health safety ranges.
//!
//! Reference values follow the Chinese Dietary Guidelines (2022):
//! - Nutrition: Mifflin-St Jeor BMR, activity factors, goal adjustments,
//!   macronutrient ratios and the per-meal calorie split
//! - Exercise: per activity level recommendations and calorie burn estimates
//! - Safety: BMI, blood pressure and sleep ranges used for warnings

use crate::types::round2;
use crate::{ActivityLevel, ExerciseIntensity, ExerciseType, Gender, HealthGoal, HealthReport, MealType};

// ============================================================================
// Nutrition
// ============================================================================

/// Safe lower bound for the daily calorie target
pub const MIN_DAILY_CALORIES: i32 = 1200;

/// Share of daily energy from protein, carbs and fat
pub const PROTEIN_RATIO: f64 = 0.15;
pub const CARBS_RATIO: f64 = 0.50;
pub const FAT_RATIO: f64 = 0.35;

/// Energy density (kcal per gram)
const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Grams of fiber recommended per 1000 kcal
const FIBER_PER_1000_KCAL: f64 = 14.0;

/// Basal metabolic rate (Mifflin-St Jeor), rounded to 2 decimals
///
/// * `weight` - kg
/// * `height` - cm
/// * `age` - years
pub fn calculate_bmr(weight: f64, height: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight + 6.25 * height - 5.0 * age as f64;
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    round2(bmr)
}

/// Total daily energy expenditure multiplier for an activity level
pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LowActive => 1.375,
        ActivityLevel::Active => 1.55,
        ActivityLevel::VeryActive => 1.725,
    }
}

pub fn calculate_daily_calories(bmr: f64, level: ActivityLevel) -> i32 {
    (bmr * activity_factor(level)).round() as i32
}

/// Daily kcal delta applied for a goal
pub fn goal_calorie_adjustment(goal: HealthGoal) -> i32 {
    match goal {
        HealthGoal::LoseWeight => -500,
        HealthGoal::GainWeight => 300,
        HealthGoal::BuildMuscle => 500,
        HealthGoal::MaintainWeight | HealthGoal::ImproveSleep | HealthGoal::GeneralHealth => 0,
    }
}

/// Apply the goal adjustment, never going below [`MIN_DAILY_CALORIES`]
pub fn adjust_calories_for_goal(calories: i32, goal: HealthGoal) -> i32 {
    calories
        .saturating_add(goal_calorie_adjustment(goal))
        .max(MIN_DAILY_CALORIES)
}

/// Macronutrient grams for a daily calorie target
pub fn calculate_nutrient_targets(calories: i32) -> crate::NutrientTargets {
    let kcal = calories as f64;
    crate::NutrientTargets {
        protein: round2(kcal * PROTEIN_RATIO / KCAL_PER_GRAM_PROTEIN),
        carbs: round2(kcal * CARBS_RATIO / KCAL_PER_GRAM_CARBS),
        fat: round2(kcal * FAT_RATIO / KCAL_PER_GRAM_FAT),
        fiber: round2(kcal / 1000.0 * FIBER_PER_1000_KCAL),
    }
}

/// Share of the daily calorie target assigned to a meal
pub fn meal_share(meal: MealType) -> f64 {
    match meal {
        MealType::Breakfast => 0.30,
        MealType::Lunch => 0.40,
        MealType::Dinner => 0.25,
        MealType::Snack => 0.05,
    }
}

/// Calorie budget for one meal (truncated)
pub fn meal_calorie_budget(daily_calories: i32, meal: MealType) -> i32 {
    (daily_calories as f64 * meal_share(meal)) as i32
}

// ============================================================================
// Exercise
// ============================================================================

/// Baseline exercise prescription for an activity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseRecommendation {
    pub sessions_per_week: u32,
    pub duration_minutes: u32,
    pub intensity: ExerciseIntensity,
}

pub fn exercise_recommendation(level: ActivityLevel) -> ExerciseRecommendation {
    let (sessions_per_week, duration_minutes, intensity) = match level {
        ActivityLevel::Sedentary => (3, 30, ExerciseIntensity::Low),
        ActivityLevel::LowActive => (3, 40, ExerciseIntensity::Low),
        ActivityLevel::Active => (4, 45, ExerciseIntensity::Medium),
        ActivityLevel::VeryActive => (5, 60, ExerciseIntensity::High),
    };
    ExerciseRecommendation {
        sessions_per_week,
        duration_minutes,
        intensity,
    }
}

/// Extra minutes per session for a goal
pub fn goal_duration_bonus(goal: HealthGoal) -> u32 {
    match goal {
        HealthGoal::LoseWeight => 15,
        _ => 0,
    }
}

/// Weekly exercise type pattern, indexed by day-in-week (position 6 rests)
pub const WEEKLY_ROTATION: [ExerciseType; 6] = [
    ExerciseType::Aerobic,
    ExerciseType::Strength,
    ExerciseType::Aerobic,
    ExerciseType::Strength,
    ExerciseType::Aerobic,
    ExerciseType::Flexibility,
];

/// Day-in-week position reserved for rest
pub const REST_DAY_POSITION: u32 = 6;

fn base_calories_per_minute(exercise_type: ExerciseType) -> f64 {
    match exercise_type {
        ExerciseType::Aerobic => 7.0,
        ExerciseType::Strength => 5.0,
        ExerciseType::Flexibility => 3.0,
    }
}

fn intensity_factor(intensity: ExerciseIntensity) -> f64 {
    match intensity {
        ExerciseIntensity::Low => 0.8,
        ExerciseIntensity::Medium => 1.0,
        ExerciseIntensity::High => 1.3,
    }
}

/// Minimum calories credited to any session
pub const MIN_CALORIES_BURNED: i32 = 50;

/// Estimate kcal burned by a session
///
/// Sessions longer than 10 minutes count 90% of their duration (warm-up
/// excluded). Weight is normalized against a 60 kg reference.
pub fn estimate_calories_burned(
    exercise_type: ExerciseType,
    duration_minutes: u32,
    weight: f64,
    intensity: ExerciseIntensity,
) -> i32 {
    let duration = duration_minutes as f64;
    let effective_duration = if duration_minutes > 10 {
        duration * 0.9
    } else {
        duration
    };

    let burned = base_calories_per_minute(exercise_type)
        * effective_duration
        * intensity_factor(intensity)
        * (weight / 60.0);

    (burned as i32).max(MIN_CALORIES_BURNED)
}

// ============================================================================
// Safety Ranges
// ============================================================================

const BMI_SAFE_MIN: f64 = 18.5;
const BMI_SAFE_MAX: f64 = 24.0;
const SYSTOLIC_RANGE: (u32, u32) = (90, 140);
const DIASTOLIC_RANGE: (u32, u32) = (60, 90);
const SLEEP_RANGE: (f64, f64) = (7.0, 9.0);

pub fn is_bmi_safe(bmi: f64) -> bool {
    (BMI_SAFE_MIN..=BMI_SAFE_MAX).contains(&bmi)
}

pub fn is_blood_pressure_safe(systolic: u32, diastolic: u32) -> bool {
    (SYSTOLIC_RANGE.0..=SYSTOLIC_RANGE.1).contains(&systolic)
        && (DIASTOLIC_RANGE.0..=DIASTOLIC_RANGE.1).contains(&diastolic)
}

pub fn is_sleep_adequate(hours: f64) -> bool {
    (SLEEP_RANGE.0..=SLEEP_RANGE.1).contains(&hours)
}

/// Warnings for measurements outside the safe ranges
pub fn health_warnings(report: &HealthReport) -> Vec<String> {
    let mut warnings = Vec::new();

    let bmi = report.bmi();
    if !is_bmi_safe(bmi) {
        warnings.push(format!(
            "BMI {:?} 属于 {} 范围，建议咨询专业医生",
            bmi,
            report.bmi_category().as_str()
        ));
    }

    if let (Some(systolic), Some(diastolic)) = (report.systolic_pressure, report.diastolic_pressure) {
        if systolic > 0 && diastolic > 0 && !is_blood_pressure_safe(systolic, diastolic) {
            warnings.push(format!("血压 {}/{} mmHg 异常，请关注", systolic, diastolic));
        }
    }

    if let Some(hours) = report.reported_sleep_hours() {
        if !is_sleep_adequate(hours) {
            warnings.push(format!("每日睡眠 {:?} 小时，建议调整到7-9小时", hours));
        }
    }

    if report.smoking {
        warnings.push("吸烟会影响身体健康，建议戒烟".to_string());
    }

    warnings
}
