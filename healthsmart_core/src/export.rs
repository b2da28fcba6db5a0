//! CSV export of generated daily plans.
//!
//! Writes one row per day using the same flat record the JSON response
//! carries, so spreadsheet users see exactly what the host received.

use crate::service::DailyPlanRecord;
use crate::Result;
use std::path::Path;

/// Write daily plan rows to `csv_path`, replacing any existing file
///
/// Returns the number of rows written.
pub fn write_daily_plans_csv(csv_path: &Path, rows: &[DailyPlanRecord]) -> Result<usize> {
    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Exported {} daily plans to {:?}", rows.len(), csv_path);
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day_number: u32, exercise: bool) -> DailyPlanRecord {
        DailyPlanRecord {
            day_number,
            date: format!("2024-01-{:02}", day_number),
            meal_breakfast: Some("燕麦粥, 鸡蛋, 圣女果".into()),
            meal_lunch: Some("糙米饭, 清蒸鱼, 时令蔬菜".into()),
            meal_dinner: Some("蒸蛋羹, 蔬菜, 少量水果".into()),
            meal_snacks: None,
            daily_calorie_goal: 1080,
            exercise_type: exercise.then(|| "有氧运动".to_string()),
            exercise_description: exercise.then(|| "以适中的速度骑行".to_string()),
            exercise_duration: if exercise { 30 } else { 0 },
            exercise_intensity: exercise.then(|| "low".to_string()),
            reminders: "记得保持充足的水分摄入，每天至少8杯水".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("plan.csv");

        let count = write_daily_plans_csv(&csv_path, &[row(1, true), row(6, false)]).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("day_number,date,meal_breakfast"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_export_rows_read_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("nested").join("plan.csv");
        let rows = vec![row(1, true), row(6, false)];

        write_daily_plans_csv(&csv_path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let parsed: Vec<DailyPlanRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("plan.csv");

        write_daily_plans_csv(&csv_path, &[row(1, true), row(2, true)]).unwrap();
        write_daily_plans_csv(&csv_path, &[row(3, true)]).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
