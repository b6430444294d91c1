//! Aggregate statistics over a loaded WHOOP dataset.
//!
//! Every averaging function errors on an empty dataset rather than returning
//! a default, and a missing field in a decoded record is fatal for the
//! statistic that touched it. Unmapped sport ids are the one silent case:
//! they are dropped from the frequency summary.

use crate::dataset::require_f64;
use crate::{sports, Error, Result, WhoopDataset};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// 1 kilocalorie = 4.184 kilojoules
const KILOJOULES_PER_KILOCALORIE: f64 = 4.184;

/// Strain score of the most recent cycle (row 0)
pub fn recent_strain(data: &WhoopDataset) -> Result<f64> {
    let first = data
        .cycles()
        .first()
        .ok_or(Error::EmptyDataset("recent strain"))?;
    require_f64(first, "strain")
}

/// Mean strain across all decoded cycle records
pub fn average_strain(data: &WhoopDataset) -> Result<f64> {
    let cycles = data.cycles();
    if cycles.is_empty() {
        return Err(Error::EmptyDataset("average strain"));
    }
    let mut sum = 0.0;
    for cycle in cycles {
        sum += require_f64(cycle, "strain")?;
    }
    Ok(sum / cycles.len() as f64)
}

/// Mean daily energy burn, converted from kilojoules to kilocalories
pub fn average_cals_burned(data: &WhoopDataset) -> Result<String> {
    let cycles = data.cycles();
    if cycles.is_empty() {
        return Err(Error::EmptyDataset("average calories burned"));
    }
    let mut sum = 0.0;
    for cycle in cycles {
        sum += require_f64(cycle, "kilojoule")?;
    }
    let avg_kilojoules = sum / cycles.len() as f64;
    let avg_kcal = avg_kilojoules / KILOJOULES_PER_KILOCALORIE;
    Ok(format!(
        "Your average calories burned per day are: {:.2}.",
        avg_kcal
    ))
}

/// The up-to-three most frequent workout types.
///
/// Ids are tallied in first-encounter order, mapped through the sport table
/// (unmapped ids dropped), then stably sorted by count descending so ties
/// keep their encounter order.
pub fn common_workouts(data: &WhoopDataset) -> Result<String> {
    let mut order = Vec::new();
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for row in data.rows() {
        let count = counts.entry(row.workout_sport_id).or_insert(0);
        if *count == 0 {
            order.push(row.workout_sport_id);
        }
        *count += 1;
    }

    let mut ranked: Vec<(&'static str, usize)> = order
        .iter()
        .filter_map(|id| sports::sport_name(*id).map(|name| (name, counts[id])))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(3);

    let names: Vec<&str> = ranked.iter().map(|(name, _)| *name).collect();
    let tallies: Vec<usize> = ranked.iter().map(|(_, count)| *count).collect();
    Ok(format!(
        "Your {} most common workouts are {:?} and you did those {:?} times respectively.",
        names.len(),
        names,
        tallies
    ))
}

/// Mean recovery score across all decoded recovery records
pub fn average_recovery_score(data: &WhoopDataset) -> Result<String> {
    let recoveries = data.recoveries();
    if recoveries.is_empty() {
        return Err(Error::EmptyDataset("average recovery score"));
    }
    let mut sum = 0.0;
    for recovery in recoveries {
        sum += require_f64(recovery, "recovery_score")?;
    }
    let avg = sum / recoveries.len() as f64;
    Ok(format!(
        "Your average recovery score is: {:.1} out of 100.",
        avg
    ))
}

/// The full height column in meters, most recent first
pub fn user_heights(data: &WhoopDataset) -> Vec<f64> {
    data.rows()
        .iter()
        .map(|row| row.user_measurements_height_meter)
        .collect()
}

/// The full weight column in kilograms, most recent first
pub fn user_weights(data: &WhoopDataset) -> Vec<f64> {
    data.rows()
        .iter()
        .map(|row| row.user_measurements_weight_kilogram)
        .collect()
}

/// Mean workout duration in minutes.
///
/// End times before start times are not rejected; a negative duration passes
/// into the average unchanged.
pub fn average_workout_duration(data: &WhoopDataset) -> Result<String> {
    let rows = data.rows();
    if rows.is_empty() {
        return Err(Error::EmptyDataset("average workout duration"));
    }
    let mut total_seconds = 0.0;
    for row in rows {
        let start = parse_workout_timestamp(&row.workout_start)?;
        let end = parse_workout_timestamp(&row.workout_end)?;
        total_seconds += (end - start).num_milliseconds() as f64 / 1000.0;
    }
    let avg_minutes = total_seconds / rows.len() as f64 / 60.0;
    Ok(format!(
        "Your average workout duration is {:.1} minutes.",
        avg_minutes
    ))
}

/// Parse a workout timestamp, stripping the single trailing UTC designator
fn parse_workout_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| Error::Timestamp(format!("'{}': {}", s, e)))
}
