//! Meal-plan request assembly, response parsing, and persistence.
//!
//! The text-generation service itself is out of scope: this module builds the
//! natural-language request from the aggregate statistics and profile, and
//! parses a captured service response into the structured weekly plan. The
//! service may wrap its JSON in prose or code fences, so parsing takes the
//! span between the first `{` and the last `}`. A response with no valid
//! JSON object is fatal with no retry.

use crate::{Error, Result, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// System role content for the generation request
pub const SYSTEM_PROMPT: &str = "You are a nutrition expert.";

/// Everything a meal-plan request is assembled from
#[derive(Clone, Debug)]
pub struct PlanInputs {
    pub profile: UserProfile,
    /// Formatted sentence from `stats::average_cals_burned`
    pub avg_cals_burned: String,
    /// Formatted sentence from `stats::common_workouts`
    pub common_workouts: String,
    /// Formatted sentence from `stats::average_workout_duration`
    pub avg_workout_duration: String,
    /// Full height column in meters
    pub heights_m: Vec<f64>,
    /// Full weight column in kilograms
    pub weights_kg: Vec<f64>,
    pub budget_dollars: u32,
}

/// Per-meal macronutrient breakdown in grams
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    #[serde(rename = "Protein")]
    pub protein: f64,
    #[serde(rename = "Carbs")]
    pub carbs: f64,
    #[serde(rename = "Fats")]
    pub fats: f64,
}

/// One day of the weekly plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(rename = "Meals")]
    pub meals: Vec<String>,
    #[serde(rename = "Macronutrient Breakdown")]
    pub macronutrient_breakdown: BTreeMap<String, Macros>,
    #[serde(rename = "Recipes")]
    pub recipes: Vec<String>,
    #[serde(rename = "Calories")]
    pub calories: Vec<f64>,
}

/// The structured weekly meal plan keyed by day-of-week, plus summary keys
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(rename = "Shopping List")]
    pub shopping_list: Vec<String>,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(flatten)]
    pub days: BTreeMap<String, DayPlan>,
}

/// Assemble the natural-language request for the generation service
pub fn build_request(inputs: &PlanInputs) -> String {
    let p = &inputs.profile;
    format!(
        "Create a week-long meal plan and shopping list for a {age} year old {gender} \
that weighs {weights:?} kilograms, is {heights:?} meters tall, who is trying to {goals}. \
{gender} is a {athlete_type} and burns an average of {cals} per day. \
{gender} mainly does {workouts} type workouts and their workouts usually last {duration}. \
Keep the cost under {budget}$. Include one snack between breakfast and lunch and one \
between lunch and dinner. They can't eat {restrictions}. \
Give me macronutrients for the meals and recipes for each day. Include calorie counts \
for each meal. \
Respond with valid JSON only so that I can write it straight to a json file. Do not \
include any additional text. Validate the JSON response before giving it to me. \
Format the response as follows: \
{{\"Monday\": {{\"Meals\": [\"Breakfast: ...\", \"Snack 1: ...\", \"Lunch: ...\", \
\"Snack 2: ...\", \"Dinner: ...\"], \"Macronutrient Breakdown\": {{\"Breakfast\": \
{{\"Protein\": 20, \"Carbs\": 30, \"Fats\": 15}}, ...}}, \"Recipes\": [...], \
\"Calories\": [...]}}, \"Tuesday\": {{...}}, ..., \
\"Shopping List\": [\"Oats: 1 lb\", ...], \"Cost\": ...}}",
        age = p.age,
        gender = p.gender,
        weights = inputs.weights_kg,
        heights = inputs.heights_m,
        goals = p.goals,
        athlete_type = p.athlete_type,
        cals = inputs.avg_cals_burned,
        workouts = inputs.common_workouts,
        duration = inputs.avg_workout_duration,
        budget = inputs.budget_dollars,
        restrictions = p.dietary_restrictions,
    )
}

/// Parse a captured service response into the structured plan
pub fn parse_response(response: &str) -> Result<MealPlan> {
    let start = response
        .find('{')
        .ok_or_else(|| Error::Plan("response contains no JSON object".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| Error::Plan("response contains no JSON object".into()))?;
    if end < start {
        return Err(Error::Plan("response contains no JSON object".into()));
    }

    let plan: MealPlan = serde_json::from_str(&response[start..=end])?;
    tracing::info!("Parsed meal plan covering {} days", plan.days.len());
    Ok(plan)
}

/// Persist the plan as pretty-printed JSON
pub fn write_plan(plan: &MealPlan, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, plan)?;
    tracing::info!("Wrote meal plan to {:?}", path);
    Ok(())
}
