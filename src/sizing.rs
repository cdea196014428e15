// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Garment size recommendation rules.
//!
//! Maps a measurement record to discrete size labels via fixed threshold
//! tables. Thresholds are defined over inches; the pipeline hands records
//! to this module before any display-unit conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::measurements::MeasurementRecord;

/// Coarse garment tightness classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Tight,
    Regular,
    Loose,
}

impl Fit {
    /// Returns the wire/string representation of the fit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Regular => "regular",
            Self::Loose => "loose",
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One garment size recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRecommendation {
    /// Garment category ("Shirt", "Pants", "Jacket").
    pub category: String,
    /// Recommended size label.
    pub size: String,
    /// Tightness classification.
    pub fit: Fit,
    /// Rule confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Chest-circumference threshold rule: inclusive upper bound, size label,
/// rule confidence. A `None` bound is the catch-all last rule.
type ChestRule = (Option<f64>, &'static str, f64);

/// Shirt sizing rules, evaluated in order, first match wins.
const SHIRT_RULES: [ChestRule; 4] = [
    (Some(36.0), "Small", 0.85),
    (Some(40.0), "Medium", 0.92),
    (Some(44.0), "Large", 0.88),
    (None, "X-Large", 0.83),
];

/// Jacket sizing rules; cut slightly larger than shirts.
const JACKET_RULES: [ChestRule; 4] = [
    (Some(38.0), "Small", 0.82),
    (Some(42.0), "Medium", 0.89),
    (Some(46.0), "Large", 0.85),
    (None, "X-Large", 0.80),
];

fn match_chest_rule(category: &str, chest: f64, rules: &[ChestRule]) -> SizingRecommendation {
    for (bound, size, confidence) in rules {
        if bound.is_none_or(|b| chest <= b) {
            return SizingRecommendation {
                category: category.to_string(),
                size: (*size).to_string(),
                fit: Fit::Regular,
                confidence: *confidence,
            };
        }
    }
    unreachable!("rule tables end with a catch-all bound")
}

/// Generate garment size recommendations for a measurement record.
///
/// Always emits exactly three recommendations, in the order Shirt, Pants,
/// Jacket. Shirt and Jacket come from chest-circumference thresholds;
/// Pants is computed as `"{waist}x{inseam}"` with both values rounded to
/// whole inches.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn recommend(record: &MeasurementRecord) -> Vec<SizingRecommendation> {
    let chest = record.chest_circumference;

    let shirt = match_chest_rule("Shirt", chest, &SHIRT_RULES);

    let waist = record.waist_circumference.round() as i64;
    let inseam = record.inseam.round() as i64;
    let pants = SizingRecommendation {
        category: "Pants".to_string(),
        size: format!("{waist}x{inseam}"),
        fit: Fit::Regular,
        confidence: 0.91,
    };

    let jacket = match_chest_rule("Jacket", chest, &JACKET_RULES);

    vec![shirt, pants, jacket]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::tests::sample_record;

    fn record_with_chest(chest: f64) -> MeasurementRecord {
        MeasurementRecord {
            chest_circumference: chest,
            ..sample_record()
        }
    }

    #[test]
    fn test_categories_in_fixed_order() {
        let recs = recommend(&sample_record());
        let categories: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Shirt", "Pants", "Jacket"]);
        assert!(recs.iter().all(|r| r.fit == Fit::Regular));
    }

    #[test]
    fn test_shirt_boundaries_inclusive() {
        let cases = [
            (36.0, "Small", 0.85),
            (36.000_001, "Medium", 0.92),
            (40.0, "Medium", 0.92),
            (44.0, "Large", 0.88),
            (44.000_001, "X-Large", 0.83),
        ];
        for (chest, size, confidence) in cases {
            let recs = recommend(&record_with_chest(chest));
            assert_eq!(recs[0].size, size, "chest {chest}");
            assert!((recs[0].confidence - confidence).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_jacket_boundaries_inclusive() {
        let cases = [
            (38.0, "Small", 0.82),
            (38.000_001, "Medium", 0.89),
            (42.0, "Medium", 0.89),
            (46.0, "Large", 0.85),
            (46.000_001, "X-Large", 0.80),
        ];
        for (chest, size, confidence) in cases {
            let recs = recommend(&record_with_chest(chest));
            assert_eq!(recs[2].size, size, "chest {chest}");
            assert!((recs[2].confidence - confidence).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_pants_size_is_computed() {
        let record = MeasurementRecord {
            waist_circumference: 33.6,
            inseam: 30.2,
            ..sample_record()
        };
        let recs = recommend(&record);
        assert_eq!(recs[1].size, "34x30");
        assert!((recs[1].confidence - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_wire_form() {
        let json = serde_json::to_string(&Fit::Regular).unwrap();
        assert_eq!(json, r#""regular""#);
    }
}
