//! Built-in meal and exercise catalogs.
//!
//! Meals are indexed by meal type and calorie tier, exercises by type and
//! intensity. Every bucket holds a handful of interchangeable options that
//! the engine picks from uniformly.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A catalog meal option before preference filtering
#[derive(Clone, Debug)]
pub struct MealOption {
    pub foods: Vec<String>,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A catalog exercise session template
#[derive(Clone, Debug)]
pub struct ExerciseTemplate {
    pub name: String,
    pub description: String,
    pub instructions: Vec<String>,
}

/// The complete catalog of meal options and exercise templates
#[derive(Clone, Debug)]
pub struct Catalog {
    pub meals: HashMap<(MealType, CalorieTier), Vec<MealOption>>,
    pub exercises: HashMap<(ExerciseType, ExerciseIntensity), Vec<ExerciseTemplate>>,
}

impl Catalog {
    pub fn meal_options(&self, meal: MealType, tier: CalorieTier) -> &[MealOption] {
        self.meals
            .get(&(meal, tier))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn exercise_templates(
        &self,
        exercise_type: ExerciseType,
        intensity: ExerciseIntensity,
    ) -> &[ExerciseTemplate] {
        self.exercises
            .get(&(exercise_type, intensity))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Validate the catalog, returning a list of problems found
    ///
    /// Every meal type needs options in every calorie tier and every
    /// exercise type needs templates at every intensity.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for meal in MealType::ALL {
            for tier in CalorieTier::ALL {
                let options = self.meal_options(meal, tier);
                if options.is_empty() {
                    errors.push(format!("No {:?} options for {:?} tier", meal, tier));
                }
                for option in options {
                    if option.foods.is_empty() {
                        errors.push(format!("{:?}/{:?} option has no foods", meal, tier));
                    }
                    if option.calories <= 0 {
                        errors.push(format!(
                            "{:?}/{:?} option {:?} has non-positive calories",
                            meal, tier, option.foods
                        ));
                    }
                }
            }
        }

        for exercise_type in ExerciseType::ALL {
            for intensity in ExerciseIntensity::ALL {
                let templates = self.exercise_templates(exercise_type, intensity);
                if templates.is_empty() {
                    errors.push(format!(
                        "No {:?} templates at {:?} intensity",
                        exercise_type, intensity
                    ));
                }
                for template in templates {
                    if template.instructions.is_empty() {
                        errors.push(format!("Template {} has no instructions", template.name));
                    }
                }
            }
        }

        errors
    }
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn meal(foods: &[&str], calories: i32, protein: f64, carbs: f64, fat: f64) -> MealOption {
    MealOption {
        foods: foods.iter().map(|f| f.to_string()).collect(),
        calories,
        protein,
        carbs,
        fat,
    }
}

fn template(name: &str, description: &str, instructions: &[&str]) -> ExerciseTemplate {
    ExerciseTemplate {
        name: name.into(),
        description: description.into(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
    }
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Catalog {
    use CalorieTier::{High, Low, Medium};
    use MealType::{Breakfast, Dinner, Lunch, Snack};

    let mut meals = HashMap::new();
    let mut exercises = HashMap::new();

    // ========================================================================
    // Meals
    // ========================================================================

    meals.insert(
        (Breakfast, Low),
        vec![
            meal(&["燕麦粥", "鸡蛋", "圣女果"], 300, 15.0, 40.0, 10.0),
            meal(&["全麦面包", "低脂牛奶", "香蕉"], 320, 12.0, 55.0, 8.0),
            meal(&["蔬菜沙拉", "水煮蛋", "无糖豆浆"], 280, 14.0, 30.0, 12.0),
        ],
    );
    meals.insert(
        (Breakfast, Medium),
        vec![
            meal(&["燕麦粥", "鸡蛋", "坚果", "水果沙拉"], 420, 18.0, 50.0, 15.0),
            meal(&["全麦面包", "煎蛋", "希腊酸奶", "蓝莓"], 450, 20.0, 55.0, 16.0),
            meal(&["蔬菜煎蛋", "全麦吐司", "牛奶", "牛油果"], 440, 18.0, 48.0, 18.0),
        ],
    );
    meals.insert(
        (Breakfast, High),
        vec![
            meal(&["燕麦粥", "鸡蛋(2个)", "坚果", "黄油面包", "水果"], 550, 22.0, 60.0, 20.0),
            meal(&["培根鸡蛋三明治", "酸奶", "水果沙拉", "拿铁"], 580, 25.0, 65.0, 22.0),
            meal(&["蔬菜煎蛋", "培根", "全麦吐司", "牛奶", "坚果"], 600, 24.0, 62.0, 24.0),
        ],
    );

    meals.insert(
        (Lunch, Low),
        vec![
            meal(&["鸡胸肉沙拉", "全麦面包", "蔬菜汤"], 450, 35.0, 35.0, 15.0),
            meal(&["糙米饭", "清蒸鱼", "时令蔬菜"], 480, 32.0, 55.0, 10.0),
            meal(&["藜麦沙拉", "水煮虾", "西兰花"], 460, 34.0, 40.0, 12.0),
        ],
    );
    meals.insert(
        (Lunch, Medium),
        vec![
            meal(&["糙米饭", "煎鸡胸肉", "混合蔬菜", "番茄汤"], 600, 40.0, 65.0, 18.0),
            meal(&["意面", "虾仁", "芦笋", "罗勒酱"], 620, 38.0, 70.0, 16.0),
            meal(&["红薯", "烤鸡腿", "彩色蔬菜", "蘑菇汤"], 640, 42.0, 68.0, 20.0),
        ],
    );
    meals.insert(
        (Lunch, High),
        vec![
            meal(&["糙米饭(2份)", "煎牛排", "时令蔬菜", "奶油汤"], 780, 50.0, 85.0, 25.0),
            meal(&["意面", "虾仁配牛排", "芦笋", "芝士"], 820, 48.0, 90.0, 28.0),
            meal(&["杂粮饭", "烤羊排", "混合蔬菜", "酱汁"], 850, 52.0, 95.0, 30.0),
        ],
    );

    meals.insert(
        (Dinner, Low),
        vec![
            meal(&["蔬菜汤", "清蒸鸡胸肉", "小份水果"], 350, 28.0, 25.0, 10.0),
            meal(&["蔬菜沙拉", "水煮虾", "无糖酸奶"], 330, 26.0, 20.0, 12.0),
            meal(&["蒸蛋羹", "蔬菜", "少量水果"], 300, 22.0, 18.0, 11.0),
        ],
    );
    meals.insert(
        (Dinner, Medium),
        vec![
            meal(&["蔬菜汤", "煎鸡腿肉", "糙米饭小份", "蔬菜"], 480, 35.0, 40.0, 14.0),
            meal(&["沙拉", "烤鱼", "蒸薯类", "蔬菜"], 500, 38.0, 45.0, 12.0),
            meal(&["清蒸鱼", "炒蔬菜", "杂粮粥", "水果"], 460, 34.0, 48.0, 10.0),
        ],
    );
    meals.insert(
        (Dinner, High),
        vec![
            meal(&["蔬菜汤", "烤牛排", "糙米饭", "混合蔬菜"], 650, 45.0, 60.0, 22.0),
            meal(&["沙拉", "三文鱼", "意面", "蔬菜"], 680, 42.0, 65.0, 20.0),
            meal(&["清蒸鱼", "炒猪排", "玉米", "蔬菜"], 700, 48.0, 70.0, 18.0),
        ],
    );

    meals.insert(
        (Snack, Low),
        vec![
            meal(&["苹果"], 70, 0.0, 19.0, 0.0),
            meal(&["酸奶小杯"], 80, 8.0, 10.0, 2.0),
            meal(&["坚果少量"], 60, 2.0, 3.0, 5.0),
        ],
    );
    meals.insert(
        (Snack, Medium),
        vec![
            meal(&["香蕉"], 100, 1.0, 27.0, 0.0),
            meal(&["酸奶中杯", "草莓"], 140, 10.0, 20.0, 3.0),
            meal(&["坚果", "黑巧克力"], 130, 4.0, 12.0, 8.0),
        ],
    );
    meals.insert(
        (Snack, High),
        vec![
            meal(&["水果沙拉"], 150, 1.0, 35.0, 1.0),
            meal(&["酸奶大杯", "坚果", "蜂蜜"], 180, 12.0, 25.0, 6.0),
            meal(&["能量棒", "水果"], 200, 6.0, 30.0, 7.0),
        ],
    );

    // ========================================================================
    // Exercises
    // ========================================================================

    exercises.insert(
        (ExerciseType::Aerobic, ExerciseIntensity::Low),
        vec![
            template("慢跑", "在平地上进行慢跑，保持均匀呼吸", &["热身5分钟", "慢跑20分钟", "拉伸5分钟"]),
            template("快走", "保持快速的步伐行走，摆臂自然", &["快速行走25分钟", "放松5分钟"]),
            template("骑自行车", "以适中的速度骑行", &["骑行20-30分钟", "注意调整呼吸"]),
        ],
    );
    exercises.insert(
        (ExerciseType::Aerobic, ExerciseIntensity::Medium),
        vec![
            template("慢跑", "提高速度，适当加入坡度", &["热身5分钟", "慢跑30分钟", "拉伸5分钟"]),
            template("游泳", "连续游泳，保持节奏", &["热身泳5分钟", "自由泳/蛙泳25分钟", "放松5分钟"]),
            template("骑自行车", "加快速度或选择起伏路线", &["热身5分钟", "骑行35分钟", "拉伸5分钟"]),
        ],
    );
    exercises.insert(
        (ExerciseType::Aerobic, ExerciseIntensity::High),
        vec![
            template(
                "间歇跑",
                "快慢交替跑步，提高心肺功能",
                &["热身5分钟", "全力冲刺1分钟", "慢跑2分钟，重复8次", "拉伸5分钟"],
            ),
            template(
                "游泳冲刺",
                "高强度间歇游泳",
                &["热身5分钟", "冲刺游泳，休息2分钟，重复6次", "放松5分钟"],
            ),
            template(
                "HIIT自行车",
                "高强度间歇骑行",
                &["热身5分钟", "全力骑行30秒，1.5分钟恢复，重复10次", "拉伸5分钟"],
            ),
        ],
    );

    exercises.insert(
        (ExerciseType::Strength, ExerciseIntensity::Low),
        vec![
            template(
                "自重训练",
                "使用自身重量进行基础训练",
                &["热身5分钟", "俯卧撑10次×3组", "深蹲15次×3组", "平板支撑30秒×3组", "拉伸5分钟"],
            ),
            template(
                "弹力带训练",
                "使用弹力带进行阻力训练",
                &["热身5分钟", "弹力带划船15次×3组", "侧平举15次×3组", "拉伸5分钟"],
            ),
        ],
    );
    exercises.insert(
        (ExerciseType::Strength, ExerciseIntensity::Medium),
        vec![
            template(
                "哑铃训练",
                "使用哑铃进行全身训练",
                &["热身5分钟", "哑铃深蹲15次×4组", "哑铃举重12次×4组", "俯身划船12次×4组", "拉伸5分钟"],
            ),
            template(
                "复合动作训练",
                "结合多个肌群的复合动作",
                &["热身5分钟", "硬拉10次×4组", "卧推12次×4组", "引体向上至力竭×3组", "拉伸5分钟"],
            ),
        ],
    );
    exercises.insert(
        (ExerciseType::Strength, ExerciseIntensity::High),
        vec![
            template(
                "高强度力量训练",
                "大重量低次数的力量训练",
                &["热身10分钟", "深蹲6次×6组", "卧举8次×5组", "硬拉5次×5组", "拉伸10分钟"],
            ),
            template(
                "超级组训练",
                "无休息连续完成两个动作",
                &[
                    "热身10分钟",
                    "俯卧撑-深蹲超级组每组12次×4组",
                    "引体向上-划船超级组每组10次×4组",
                    "拉伸10分钟",
                ],
            ),
        ],
    );

    exercises.insert(
        (ExerciseType::Flexibility, ExerciseIntensity::Low),
        vec![template(
            "基础拉伸",
            "全身的基础拉伸动作",
            &["颈部拉伸30秒×2", "肩部拉伸30秒×2", "背部拉伸30秒×2", "腿部拉伸30秒×2"],
        )],
    );
    exercises.insert(
        (ExerciseType::Flexibility, ExerciseIntensity::Medium),
        vec![template(
            "瑜伽基础",
            "基础瑜伽体式组合",
            &["山式站立", "下犬式保持10次呼吸", "战士一式保持10次呼吸", "树式保持15秒每侧", "大休息式5分钟"],
        )],
    );
    exercises.insert(
        (ExerciseType::Flexibility, ExerciseIntensity::High),
        vec![template(
            "高级瑜伽",
            "更具挑战性的瑜伽序列",
            &["拜日式A重复5次", "倒立练习", "后弯体式", "深度拉伸保持"],
        )],
    );

    Catalog { meals, exercises }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.meals.len(), 12);
        assert_eq!(catalog.exercises.len(), 9);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_every_meal_tier_has_three_options() {
        let catalog = get_default_catalog();
        for meal in MealType::ALL {
            for tier in CalorieTier::ALL {
                assert_eq!(catalog.meal_options(meal, tier).len(), 3);
            }
        }
    }

    #[test]
    fn test_high_intensity_flexibility_available() {
        let catalog = get_default_catalog();
        let templates =
            catalog.exercise_templates(ExerciseType::Flexibility, ExerciseIntensity::High);
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "高级瑜伽");
    }

    #[test]
    fn test_validate_reports_missing_bucket() {
        let mut catalog = build_default_catalog();
        catalog.meals.remove(&(MealType::Snack, CalorieTier::High));
        catalog
            .exercises
            .remove(&(ExerciseType::Strength, ExerciseIntensity::Low));

        let errors = catalog.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Snack"));
        assert!(errors[1].contains("Strength"));
    }
}
