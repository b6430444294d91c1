//! User context collection.
//!
//! The five free-text attributes the meal-plan request needs beyond the
//! export. Answers are taken verbatim with no validation or normalization.
//! Prompting is written against generic reader/writer handles so statistics
//! and context gathering stay testable without a live terminal; a profile
//! can also be loaded from a TOML file for non-interactive runs.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;

/// Free-text user attributes supplied by the operator
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct UserProfile {
    pub goals: String,
    pub athlete_type: String,
    pub age: String,
    pub gender: String,
    pub dietary_restrictions: String,
}

impl UserProfile {
    /// Load a profile from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let profile: UserProfile = toml::from_str(&contents)?;
        tracing::info!("Loaded profile from {:?}", path);
        Ok(profile)
    }
}

const GOALS_PROMPT: &str = "What is your fitness goal? Would you like to lose weight? \
Would you like to build muscle? Would you like to build muscle while losing weight? \
Would you like to maintain weight? Please be specific: ";

const ATHLETE_TYPE_PROMPT: &str = "What sport do you specialize in and what type of \
athlete are you? Strength? Power? Cardio? Example response is: I am a sprinter \
focusing on building explosivity/power. Please be specific: ";

const AGE_PROMPT: &str = "How old are you? ";

const GENDER_PROMPT: &str = "What is your gender? If you prefer not to answer, \
please put N/A. ";

const DIETARY_RESTRICTIONS_PROMPT: &str = "Do you have dietary restrictions? If so, \
what are they? Please put foods you do not enjoy/will not eat. ";

/// Ask the five profile questions in order and collect the answers.
///
/// Blocks on the reader for each answer; only the line terminator is
/// stripped.
pub fn prompt_profile(mut reader: impl BufRead, mut writer: impl Write) -> Result<UserProfile> {
    Ok(UserProfile {
        goals: ask(&mut reader, &mut writer, GOALS_PROMPT)?,
        athlete_type: ask(&mut reader, &mut writer, ATHLETE_TYPE_PROMPT)?,
        age: ask(&mut reader, &mut writer, AGE_PROMPT)?,
        gender: ask(&mut reader, &mut writer, GENDER_PROMPT)?,
        dietary_restrictions: ask(&mut reader, &mut writer, DIETARY_RESTRICTIONS_PROMPT)?,
    })
}

fn ask(reader: &mut impl BufRead, writer: &mut impl Write, question: &str) -> Result<String> {
    write!(writer, "{}", question)?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    while answer.ends_with('\n') || answer.ends_with('\r') {
        answer.pop();
    }
    Ok(answer)
}
