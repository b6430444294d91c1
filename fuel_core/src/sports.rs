//! Fixed WHOOP sport id table.
//!
//! Maps the categorical `workout_sport_id` codes from the export to readable
//! sport names. Codes absent from the table are silently excluded from
//! frequency summaries, never errored. The table is static data; there is no
//! runtime extension point.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static SPORT_NAMES: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (-1, "Activity"),
        (0, "Running"),
        (1, "Cycling"),
        (16, "Baseball"),
        (17, "Basketball"),
        (18, "Rowing"),
        (20, "Field Hockey"),
        (21, "Football"),
        (22, "Golf"),
        (24, "Ice Hockey"),
        (25, "Lacrosse"),
        (26, "Rugby"),
        (29, "Skiing"),
        (30, "Soccer"),
        (31, "Softball"),
        (32, "Squash"),
        (33, "Swimming"),
        (34, "Tennis"),
        (35, "Track and Field"),
        (36, "Volleyball"),
        (39, "Boxing"),
        (42, "Dance"),
        (43, "Pilates"),
        (44, "Yoga"),
        (45, "Weightlifting"),
        (47, "Cross Country Skiing"),
        (49, "Duathlon"),
        (52, "Hiking/Rucking"),
        (57, "Mountain Biking"),
        (59, "Powerlifting"),
        (62, "Triathlon"),
        (63, "Walking"),
        (64, "Surfing"),
        (70, "Meditation"),
        (71, "Other"),
        (88, "Ice Bath"),
        (96, "HIIT"),
        (97, "Spin"),
        (98, "Jiu Jitsu"),
        (99, "Manual Labor"),
        (101, "Pickleball"),
        (126, "Assault Bike"),
        (233, "Sauna"),
    ])
});

/// Look up the readable name for a sport id
pub fn sport_name(id: i64) -> Option<&'static str> {
    SPORT_NAMES.get(&id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert_eq!(sport_name(0), Some("Running"));
        assert_eq!(sport_name(1), Some("Cycling"));
        assert_eq!(sport_name(-1), Some("Activity"));
        assert_eq!(sport_name(233), Some("Sauna"));
    }

    #[test]
    fn test_unmapped_id_is_none() {
        assert_eq!(sport_name(5), None);
        assert_eq!(sport_name(1000), None);
    }

    #[test]
    fn test_table_size() {
        assert_eq!(SPORT_NAMES.len(), 43);
    }
}
