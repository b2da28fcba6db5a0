//! Core domain types for the HealthSmart plan engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - The monthly health report and its classification enums
//! - Nutrition targets and meal suggestions
//! - Exercise plans
//! - Daily and monthly plans

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Report Classification
// ============================================================================

/// Gender used by the BMR formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    #[default]
    Female,
}

impl Gender {
    /// Parse a gender string; returns None for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "男" => Some(Gender::Male),
            "female" | "f" | "女" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Health goal stated on the report
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    LoseWeight,
    MaintainWeight,
    GainWeight,
    BuildMuscle,
    ImproveSleep,
    #[default]
    GeneralHealth,
}

impl HealthGoal {
    /// Parse a goal string, None when the string is not a known goal
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lose_weight" => Some(HealthGoal::LoseWeight),
            "maintain_weight" => Some(HealthGoal::MaintainWeight),
            "gain_weight" => Some(HealthGoal::GainWeight),
            "build_muscle" => Some(HealthGoal::BuildMuscle),
            "improve_sleep" => Some(HealthGoal::ImproveSleep),
            "general_health" => Some(HealthGoal::GeneralHealth),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGoal::LoseWeight => "lose_weight",
            HealthGoal::MaintainWeight => "maintain_weight",
            HealthGoal::GainWeight => "gain_weight",
            HealthGoal::BuildMuscle => "build_muscle",
            HealthGoal::ImproveSleep => "improve_sleep",
            HealthGoal::GeneralHealth => "general_health",
        }
    }
}

/// BMI classification (Chinese adult thresholds 18.5 / 24 / 28)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.0 {
            BmiCategory::Normal
        } else if bmi < 28.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

/// Coarse activity bucket derived from weekly exercise frequency
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LowActive,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// 0 → sedentary, 1-2 → low active, 3-4 → active, 5+ → very active
    pub fn from_weekly_frequency(sessions: u32) -> Self {
        match sessions {
            0 => ActivityLevel::Sedentary,
            1..=2 => ActivityLevel::LowActive,
            3..=4 => ActivityLevel::Active,
            _ => ActivityLevel::VeryActive,
        }
    }
}

// ============================================================================
// Health Report
// ============================================================================

/// Monthly health report snapshot; immutable for the duration of a request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub user_id: i64,
    pub report_month: String,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub gender: Gender,
    pub body_fat_rate: Option<f64>,
    pub muscle_mass: Option<f64>,
    pub systolic_pressure: Option<u32>,
    pub diastolic_pressure: Option<u32>,
    pub sleep_hours_avg: Option<f64>,
    pub sleep_quality: Option<u32>,
    pub smoking: bool,
    pub drinking: bool,
    /// Exercise sessions per week
    pub exercise_frequency: Option<u32>,
    pub dietary_preferences: Option<String>,
    pub food_allergies: Option<String>,
    pub health_goal: HealthGoal,
    pub target_weight: Option<f64>,
    pub medical_history: Option<String>,
    pub medications: Option<String>,
    pub stress_level: Option<u32>,
    pub energy_level: Option<u32>,
    pub additional_notes: Option<String>,
}

impl HealthReport {
    /// Minimal report with the given body measurements; everything else unset
    pub fn new(height: f64, weight: f64) -> Self {
        Self {
            user_id: 0,
            report_month: String::new(),
            height,
            weight,
            gender: Gender::default(),
            body_fat_rate: None,
            muscle_mass: None,
            systolic_pressure: None,
            diastolic_pressure: None,
            sleep_hours_avg: None,
            sleep_quality: None,
            smoking: false,
            drinking: false,
            exercise_frequency: None,
            dietary_preferences: None,
            food_allergies: None,
            health_goal: HealthGoal::default(),
            target_weight: None,
            medical_history: None,
            medications: None,
            stress_level: None,
            energy_level: None,
            additional_notes: None,
        }
    }

    /// BMI = weight / height_m², rounded to 2 decimals
    pub fn bmi(&self) -> f64 {
        let height_m = self.height / 100.0;
        round2(self.weight / (height_m * height_m))
    }

    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }

    pub fn activity_level(&self) -> ActivityLevel {
        ActivityLevel::from_weekly_frequency(self.exercise_frequency.unwrap_or(0))
    }

    /// Average sleep when reported; zero counts as not reported
    pub fn reported_sleep_hours(&self) -> Option<f64> {
        self.sleep_hours_avg.filter(|h| *h > 0.0)
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Analysis and Nutrition
// ============================================================================

/// Daily macronutrient amounts in grams
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutrientTargets {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// Result of analysing a health report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmr: f64,
    pub activity_level: ActivityLevel,
    pub target_calories: i32,
    pub nutrient_targets: NutrientTargets,
    pub warnings: Vec<String>,
    pub health_goal: HealthGoal,
}

/// Daily nutrition target shared by every day of a plan
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct NutritionTarget {
    pub daily_calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl From<&HealthAnalysis> for NutritionTarget {
    fn from(analysis: &HealthAnalysis) -> Self {
        Self {
            daily_calories: analysis.target_calories,
            protein: analysis.nutrient_targets.protein,
            carbs: analysis.nutrient_targets.carbs,
            fat: analysis.nutrient_targets.fat,
            fiber: analysis.nutrient_targets.fiber,
        }
    }
}

// ============================================================================
// Meals
// ============================================================================

/// Meal slot within a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

/// Portion bucket used to pick meal options
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CalorieTier {
    Low,
    Medium,
    High,
}

impl CalorieTier {
    pub const ALL: [CalorieTier; 3] = [CalorieTier::Low, CalorieTier::Medium, CalorieTier::High];

    /// low < 1500 kcal, medium < 2200 kcal, high otherwise
    pub fn from_daily_calories(calories: i32) -> Self {
        if calories < 1500 {
            CalorieTier::Low
        } else if calories < 2200 {
            CalorieTier::Medium
        } else {
            CalorieTier::High
        }
    }
}

/// One meal's suggestion after preference filtering
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MealSuggestion {
    pub meal_type: MealType,
    pub food_items: Vec<String>,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub description: String,
    pub preparation_tips: Option<String>,
    /// Share of the daily target allotted to this meal
    pub calorie_budget: i32,
}

// ============================================================================
// Exercise
// ============================================================================

/// Exercise category cycled through the week
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Aerobic,
    Strength,
    Flexibility,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 3] = [
        ExerciseType::Aerobic,
        ExerciseType::Strength,
        ExerciseType::Flexibility,
    ];

    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseType::Aerobic => "有氧运动",
            ExerciseType::Strength => "力量训练",
            ExerciseType::Flexibility => "柔韧性训练",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseIntensity {
    Low,
    Medium,
    High,
}

impl ExerciseIntensity {
    pub const ALL: [ExerciseIntensity; 3] = [
        ExerciseIntensity::Low,
        ExerciseIntensity::Medium,
        ExerciseIntensity::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseIntensity::Low => "low",
            ExerciseIntensity::Medium => "medium",
            ExerciseIntensity::High => "high",
        }
    }
}

/// One day's exercise prescription
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExercisePlan {
    pub exercise_type: ExerciseType,
    pub exercise_name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub intensity: ExerciseIntensity,
    pub calories_burned: i32,
    pub instructions: Vec<String>,
}

// ============================================================================
// Plans
// ============================================================================

/// Everything planned for a single day
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyPlan {
    /// 1-based position within the plan
    pub day_number: u32,
    pub date: NaiveDate,
    pub breakfast: Option<MealSuggestion>,
    pub lunch: Option<MealSuggestion>,
    pub dinner: Option<MealSuggestion>,
    pub snack: Option<MealSuggestion>,
    pub exercise: Option<ExercisePlan>,
    pub reminders: Vec<String>,
    pub notes: Vec<String>,
}

impl DailyPlan {
    pub fn meals(&self) -> impl Iterator<Item = &MealSuggestion> {
        [&self.breakfast, &self.lunch, &self.dinner, &self.snack]
            .into_iter()
            .flatten()
    }

    /// Sum of calories over the meals present that day
    pub fn total_calories(&self) -> i32 {
        self.meals()
            .fold(0, |total: i32, m| total.saturating_add(m.calories))
    }

    pub fn is_rest_day(&self) -> bool {
        self.exercise.is_none()
    }
}

/// A full plan over the horizon (30 days by default)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub user_id: i64,
    pub plan_month: String,
    pub nutrition_target: NutritionTarget,
    pub exercise_sessions_per_week: u32,
    pub daily_plans: Vec<DailyPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_reference_values() {
        let report = HealthReport::new(170.0, 70.0);
        assert_eq!(report.bmi(), 24.22);
        assert_eq!(report.bmi_category(), BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_monotonic_in_weight() {
        let mut last = 0.0;
        for weight in (40..=120).step_by(5) {
            let bmi = HealthReport::new(175.0, weight as f64).bmi();
            assert!(bmi >= last, "BMI decreased at weight {}", weight);
            last = bmi;
        }
    }

    #[test]
    fn test_bmi_category_thresholds() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(23.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(28.0), BmiCategory::Obese);
    }

    #[test]
    fn test_activity_level_buckets() {
        assert_eq!(ActivityLevel::from_weekly_frequency(0), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_weekly_frequency(2), ActivityLevel::LowActive);
        assert_eq!(ActivityLevel::from_weekly_frequency(3), ActivityLevel::Active);
        assert_eq!(ActivityLevel::from_weekly_frequency(4), ActivityLevel::Active);
        assert_eq!(ActivityLevel::from_weekly_frequency(9), ActivityLevel::VeryActive);
    }

    #[test]
    fn test_calorie_tiers() {
        assert_eq!(CalorieTier::from_daily_calories(1499), CalorieTier::Low);
        assert_eq!(CalorieTier::from_daily_calories(1500), CalorieTier::Medium);
        assert_eq!(CalorieTier::from_daily_calories(2199), CalorieTier::Medium);
        assert_eq!(CalorieTier::from_daily_calories(2200), CalorieTier::High);
    }

    #[test]
    fn test_parse_goal_and_gender() {
        assert_eq!(HealthGoal::parse("LOSE_WEIGHT"), Some(HealthGoal::LoseWeight));
        assert_eq!(HealthGoal::parse("run_marathon"), None);
        assert_eq!(Gender::parse("男"), Some(Gender::Male));
        assert_eq!(Gender::parse(" Female "), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
    }

    #[test]
    fn test_goal_serializes_snake_case() {
        let json = serde_json::to_string(&HealthGoal::BuildMuscle).unwrap();
        assert_eq!(json, "\"build_muscle\"");
        assert_eq!(HealthGoal::BuildMuscle.as_str(), "build_muscle");
    }
}
