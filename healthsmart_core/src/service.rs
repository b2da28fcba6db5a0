//! JSON façade used by the host process.
//!
//! Requests arrive as JSON objects; they are mapped to typed reports, run
//! through the planning engine and returned inside a
//! `{success, data, message}` envelope. Engine failures never escape as
//! errors: they become `success: false` envelopes.

use crate::catalog::{get_default_catalog, Catalog};
use crate::engine::PlanningEngine;
use crate::summary::{summarize_plan, PlanSummary};
use crate::{
    Config, DailyPlan, Error, Gender, HealthAnalysis, HealthGoal, HealthReport, MonthlyPlan,
    NutritionTarget, Result,
};
use chrono::NaiveDate;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Actions and Envelopes
// ============================================================================

/// Actions understood by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    GeneratePlan,
    DailyRecommendation,
    AnalyzeHealth,
    Health,
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generate_plan" => Ok(Action::GeneratePlan),
            "daily_recommendation" => Ok(Action::DailyRecommendation),
            "analyze_health" => Ok(Action::AnalyzeHealth),
            "health" => Ok(Action::Health),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}

/// Response wrapper returned for every data-producing action
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.to_string(),
        }
    }

    fn failed(prefix: &str, err: &Error) -> Self {
        tracing::error!("{}: {}", prefix, err);
        Self {
            success: false,
            data: None,
            message: format!("{}: {}", prefix, err),
        }
    }
}

/// A serialized response plus whether it reports success
#[derive(Clone, Debug)]
pub struct Response {
    pub success: bool,
    pub body: Value,
}

impl Response {
    fn from_envelope<T: Serialize>(envelope: Envelope<T>) -> Self {
        match serde_json::to_value(&envelope) {
            Ok(body) => Self {
                success: envelope.success,
                body,
            },
            Err(e) => Self::failure(Error::from(e).to_string()),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            body: json!({ "success": false, "message": message }),
        }
    }
}

/// Liveness payload for the `health` action
pub fn health_status() -> Value {
    json!({ "status": "ok", "message": "Engine is running" })
}

/// Usage payload printed when no action is given
pub fn usage() -> Value {
    json!({
        "name": "HealthSmart Plan Engine",
        "version": env!("CARGO_PKG_VERSION"),
        "usage": "healthsmart <action> [json_data]",
        "actions": {
            "generate_plan": "根据健康报告生成月度计划",
            "daily_recommendation": "生成每日推荐",
            "analyze_health": "分析健康数据",
            "health": "检查引擎健康状态"
        },
        "example": "healthsmart generate_plan '{\"user_id\":1,\"height\":175,\"weight\":70}'"
    })
}

// ============================================================================
// Requests
// ============================================================================

/// Health report as sent by the host; missing fields take host defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub report_month: String,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub gender: Option<String>,
    pub body_fat_rate: Option<f64>,
    pub muscle_mass: Option<f64>,
    pub systolic_pressure: Option<u32>,
    pub diastolic_pressure: Option<u32>,
    pub sleep_hours_avg: Option<f64>,
    pub sleep_quality: Option<u32>,
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub drinking: bool,
    pub exercise_frequency: Option<u32>,
    pub dietary_preferences: Option<String>,
    pub food_allergies: Option<String>,
    pub health_goal: Option<String>,
    pub target_weight: Option<f64>,
    pub medical_history: Option<String>,
    pub medications: Option<String>,
    pub stress_level: Option<u32>,
    pub energy_level: Option<u32>,
    pub additional_notes: Option<String>,
}

/// Upper bounds for plausible body measurements
const MAX_HEIGHT_CM: f64 = 300.0;
const MAX_WEIGHT_KG: f64 = 1000.0;

fn default_height() -> f64 {
    170.0
}

fn default_weight() -> f64 {
    70.0
}

impl ReportRequest {
    /// Validate and convert into a domain report
    pub fn into_report(self, default_gender: Gender) -> Result<HealthReport> {
        if !(self.height > 0.0 && self.height <= MAX_HEIGHT_CM) {
            return Err(Error::InvalidReport(format!(
                "height must be in (0, {}] cm, got {}",
                MAX_HEIGHT_CM, self.height
            )));
        }
        if !(self.weight > 0.0 && self.weight <= MAX_WEIGHT_KG) {
            return Err(Error::InvalidReport(format!(
                "weight must be in (0, {}] kg, got {}",
                MAX_WEIGHT_KG, self.weight
            )));
        }

        let gender = match self.gender.as_deref() {
            None | Some("") => default_gender,
            Some(raw) => Gender::parse(raw).unwrap_or_else(|| {
                tracing::warn!("Unrecognized gender {:?}, using {:?}", raw, default_gender);
                default_gender
            }),
        };

        let health_goal = match self.health_goal.as_deref() {
            None | Some("") => HealthGoal::default(),
            Some(raw) => HealthGoal::parse(raw).unwrap_or_else(|| {
                tracing::warn!(
                    "Unrecognized health goal {:?}, using {}",
                    raw,
                    HealthGoal::default().as_str()
                );
                HealthGoal::default()
            }),
        };

        Ok(HealthReport {
            user_id: self.user_id,
            report_month: self.report_month,
            height: self.height,
            weight: self.weight,
            gender,
            body_fat_rate: self.body_fat_rate,
            muscle_mass: self.muscle_mass,
            systolic_pressure: self.systolic_pressure,
            diastolic_pressure: self.diastolic_pressure,
            sleep_hours_avg: self.sleep_hours_avg,
            sleep_quality: self.sleep_quality,
            smoking: self.smoking,
            drinking: self.drinking,
            exercise_frequency: self.exercise_frequency,
            dietary_preferences: self.dietary_preferences,
            food_allergies: self.food_allergies,
            health_goal,
            target_weight: self.target_weight,
            medical_history: self.medical_history,
            medications: self.medications,
            stress_level: self.stress_level,
            energy_level: self.energy_level,
            additional_notes: self.additional_notes,
        })
    }
}

/// Payload of the `daily_recommendation` action
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRequest {
    #[serde(default = "default_user_data")]
    pub user_data: Value,
    #[serde(default = "default_day_number")]
    pub day_number: u32,
    #[serde(default)]
    pub date: String,
}

fn default_user_data() -> Value {
    json!({})
}

fn default_day_number() -> u32 {
    1
}

// ============================================================================
// Response Records
// ============================================================================

/// Flat per-day row consumed by the host (and written to CSV)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPlanRecord {
    pub day_number: u32,
    pub date: String,
    pub meal_breakfast: Option<String>,
    pub meal_lunch: Option<String>,
    pub meal_dinner: Option<String>,
    pub meal_snacks: Option<String>,
    pub daily_calorie_goal: i32,
    pub exercise_type: Option<String>,
    pub exercise_description: Option<String>,
    pub exercise_duration: u32,
    pub exercise_intensity: Option<String>,
    pub reminders: String,
    pub notes: String,
}

impl From<&DailyPlan> for DailyPlanRecord {
    fn from(day: &DailyPlan) -> Self {
        let exercise = day.exercise.as_ref();
        DailyPlanRecord {
            day_number: day.day_number,
            date: day.date.format("%Y-%m-%d").to_string(),
            meal_breakfast: day.breakfast.as_ref().map(|m| m.description.clone()),
            meal_lunch: day.lunch.as_ref().map(|m| m.description.clone()),
            meal_dinner: day.dinner.as_ref().map(|m| m.description.clone()),
            meal_snacks: day.snack.as_ref().map(|m| m.description.clone()),
            daily_calorie_goal: day.total_calories(),
            exercise_type: exercise.map(|e| e.exercise_type.label().to_string()),
            exercise_description: exercise.map(|e| e.description.clone()),
            exercise_duration: exercise.map_or(0, |e| e.duration_minutes),
            exercise_intensity: exercise.map(|e| e.intensity.as_str().to_string()),
            reminders: day.reminders.join("; "),
            notes: day.notes.join("; "),
        }
    }
}

/// Monthly plan in the host's flat layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPlanRecord {
    pub user_id: i64,
    pub plan_month: String,
    pub total_days: usize,
    pub calorie_target: i32,
    pub protein_target: f64,
    pub carbs_target: f64,
    pub fat_target: f64,
    pub fiber_target: f64,
    pub exercise_sessions_per_week: u32,
    pub daily_plans: Vec<DailyPlanRecord>,
}

impl From<&MonthlyPlan> for MonthlyPlanRecord {
    fn from(plan: &MonthlyPlan) -> Self {
        let target = &plan.nutrition_target;
        MonthlyPlanRecord {
            user_id: plan.user_id,
            plan_month: plan.plan_month.clone(),
            total_days: plan.daily_plans.len(),
            calorie_target: target.daily_calories,
            protein_target: target.protein,
            carbs_target: target.carbs,
            fat_target: target.fat,
            fiber_target: target.fiber,
            exercise_sessions_per_week: plan.exercise_sessions_per_week,
            daily_plans: plan.daily_plans.iter().map(DailyPlanRecord::from).collect(),
        }
    }
}

/// Data returned by `generate_plan`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub analysis: HealthAnalysis,
    pub plan: MonthlyPlanRecord,
    pub summary: PlanSummary,
}

// ============================================================================
// Engine API
// ============================================================================

/// Entry point wrapping the planning engine with envelopes and randomness
pub struct EngineApi {
    engine: PlanningEngine<'static>,
    config: Config,
    rng: Box<dyn RngCore>,
    csv_export: Option<PathBuf>,
}

impl EngineApi {
    /// Build the API over the default catalog
    ///
    /// `seed` overrides `config.random.seed`; with neither set, selection
    /// uses the thread-local generator.
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self> {
        let rng: Box<dyn RngCore> = match seed.or(config.random.seed) {
            Some(seed) => {
                tracing::info!("Using seeded random selection (seed {})", seed);
                Box::new(ChaCha8Rng::seed_from_u64(seed))
            }
            None => Box::new(rand::rng()),
        };
        Self::with_rng(get_default_catalog(), config, rng)
    }

    /// Build the API over a specific catalog and random source
    pub fn with_rng(catalog: &'static Catalog, config: Config, rng: Box<dyn RngCore>) -> Result<Self> {
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        Ok(Self {
            engine: PlanningEngine::new(catalog, &config.engine),
            config,
            rng,
            csv_export: None,
        })
    }

    /// Also write the daily rows of every generated plan to a CSV file
    pub fn with_csv_export(mut self, path: PathBuf) -> Self {
        self.csv_export = Some(path);
        self
    }

    /// Parse a raw JSON payload and run the named action
    pub fn handle(&mut self, action: &str, payload: &str) -> Response {
        let action = match action.parse::<Action>() {
            Ok(action) => action,
            Err(e) => return Response::failure(e.to_string()),
        };

        if action == Action::Health {
            return Response {
                success: true,
                body: health_status(),
            };
        }

        let data: Value = match serde_json::from_str(payload) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Rejecting payload for {:?}: {}", action, e);
                return Response::failure("Invalid JSON data".into());
            }
        };

        self.dispatch(action, data)
    }

    /// Run an action against an already parsed payload
    pub fn dispatch(&mut self, action: Action, data: Value) -> Response {
        match action {
            Action::GeneratePlan => {
                let envelope = self.generate_plan(data);
                if let (Some(path), Some(generated)) = (&self.csv_export, &envelope.data) {
                    if let Err(e) = crate::export::write_daily_plans_csv(path, &generated.plan.daily_plans) {
                        return Response::from_envelope(Envelope::<GeneratedPlan>::failed("生成计划失败", &e));
                    }
                }
                Response::from_envelope(envelope)
            }
            Action::DailyRecommendation => {
                Response::from_envelope(self.generate_daily_recommendation(data))
            }
            Action::AnalyzeHealth => Response::from_envelope(self.analyze_health(data)),
            Action::Health => Response {
                success: true,
                body: health_status(),
            },
        }
    }

    /// Report → analysis, 30-day plan and summary
    pub fn generate_plan(&mut self, report_data: Value) -> Envelope<GeneratedPlan> {
        match self.try_generate_plan(report_data) {
            Ok(generated) => Envelope::ok(generated, "计划生成成功"),
            Err(e) => Envelope::failed("生成计划失败", &e),
        }
    }

    /// Regenerate a single day for the given user data
    pub fn generate_daily_recommendation(&mut self, request: Value) -> Envelope<DailyPlanRecord> {
        match self.try_daily_recommendation(request) {
            Ok(record) => Envelope::ok(record, "每日推荐生成成功"),
            Err(e) => Envelope::failed("生成每日推荐失败", &e),
        }
    }

    /// Report → analysis only
    pub fn analyze_health(&mut self, report_data: Value) -> Envelope<HealthAnalysis> {
        match self.parse_report(report_data) {
            Ok(report) => Envelope::ok(self.engine.analyze(&report), "健康分析成功"),
            Err(e) => Envelope::failed("健康分析失败", &e),
        }
    }

    fn try_generate_plan(&mut self, report_data: Value) -> Result<GeneratedPlan> {
        let report = self.parse_report(report_data)?;
        let plan = self.engine.monthly_plan(
            &report,
            &report.report_month,
            self.config.engine.plan_days,
            &mut *self.rng,
        )?;

        Ok(GeneratedPlan {
            analysis: self.engine.analyze(&report),
            summary: summarize_plan(&plan),
            plan: MonthlyPlanRecord::from(&plan),
        })
    }

    fn try_daily_recommendation(&mut self, request: Value) -> Result<DailyPlanRecord> {
        let request: DailyRequest = serde_json::from_value(request)?;
        if request.day_number == 0 {
            return Err(Error::InvalidReport("day_number must be at least 1".into()));
        }

        let date = match request.date.trim() {
            "" => chrono::Local::now().date_naive(),
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| Error::InvalidDate(format!("date {:?}: {}", raw, e)))?,
        };

        let report = self.parse_report(request.user_data)?;
        let analysis = self.engine.analyze(&report);
        let target = NutritionTarget::from(&analysis);

        tracing::info!(
            "Daily recommendation for user {} day {} ({})",
            report.user_id,
            request.day_number,
            date
        );

        let day = self
            .engine
            .daily_plan(&report, &target, request.day_number, date, &mut *self.rng);
        Ok(DailyPlanRecord::from(&day))
    }

    fn parse_report(&self, data: Value) -> Result<HealthReport> {
        let request: ReportRequest = serde_json::from_value(data)?;
        request.into_report(self.config.engine.default_gender)
    }
}
