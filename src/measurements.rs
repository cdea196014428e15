// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Body measurement record and unit conversion.
//!
//! A [`MeasurementRecord`] is produced once per completed session and is
//! immutable afterward; converting units yields a new record rather than
//! mutating in place. Every length field is expressed in the single unit
//! declared by `units`; mixed-unit records are invalid by construction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Centimeters per inch, the exact conversion contract.
pub const CM_PER_INCH: f64 = 2.54;

/// Length unit of a measurement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    /// Imperial inches.
    #[serde(rename = "inches")]
    Inches,
    /// Metric centimeters.
    #[serde(rename = "cm")]
    Cm,
}

impl Units {
    /// Returns the wire/string representation of the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inches => "inches",
            Self::Cm => "cm",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Units {
    type Err = UnitsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "cm" | "centimeters" | "centimetres" => Ok(Self::Cm),
            _ => Err(UnitsParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid unit string.
#[derive(Debug, Clone)]
pub struct UnitsParseError(String);

impl fmt::Display for UnitsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid units '{}', expected 'inches' or 'cm'", self.0)
    }
}

impl std::error::Error for UnitsParseError {}

/// Full set of clothing-relevant body measurements for one session.
///
/// All length fields are in the unit declared by `units`. Optional fields
/// are estimates the pipeline may not produce for every subject; `weight`
/// is reserved and never synthesized from landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    // Upper body
    pub neck_circumference: f64,
    pub shoulder_width: f64,
    pub chest_circumference: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bust_circumference: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underbust_circumference: Option<f64>,
    pub waist_circumference: f64,
    pub arm_length: f64,
    pub bicep_circumference: f64,
    pub wrist_circumference: f64,
    pub shirt_length: f64,

    // Lower body
    pub hip_circumference: f64,
    pub thigh_circumference: f64,
    pub inseam: f64,
    pub outseam: f64,
    pub knee_circumference: f64,
    pub calf_circumference: f64,
    pub ankle_circumference: f64,

    // General
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    // Metadata
    pub confidence: f64,
    pub captured_at: DateTime<Utc>,
    pub units: Units,
}

impl MeasurementRecord {
    /// Convert the record to the target unit.
    ///
    /// Returns the record unchanged when it is already in `target`.
    /// Otherwise every length field is scaled by the linear factor
    /// ([`CM_PER_INCH`] or its inverse); optional fields are converted only
    /// when present. `confidence` and `captured_at` are untouched. A new
    /// record is produced; the input is never mutated.
    #[must_use]
    pub fn convert(&self, target: Units) -> Self {
        if self.units == target {
            return self.clone();
        }

        let factor = match target {
            Units::Cm => CM_PER_INCH,
            Units::Inches => 1.0 / CM_PER_INCH,
        };

        Self {
            neck_circumference: self.neck_circumference * factor,
            shoulder_width: self.shoulder_width * factor,
            chest_circumference: self.chest_circumference * factor,
            bust_circumference: self.bust_circumference.map(|v| v * factor),
            underbust_circumference: self.underbust_circumference.map(|v| v * factor),
            waist_circumference: self.waist_circumference * factor,
            arm_length: self.arm_length * factor,
            bicep_circumference: self.bicep_circumference * factor,
            wrist_circumference: self.wrist_circumference * factor,
            shirt_length: self.shirt_length * factor,
            hip_circumference: self.hip_circumference * factor,
            thigh_circumference: self.thigh_circumference * factor,
            inseam: self.inseam * factor,
            outseam: self.outseam * factor,
            knee_circumference: self.knee_circumference * factor,
            calf_circumference: self.calf_circumference * factor,
            ankle_circumference: self.ankle_circumference * factor,
            height: self.height * factor,
            weight: self.weight.map(|v| v * factor),
            confidence: self.confidence,
            captured_at: self.captured_at,
            units: target,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_record() -> MeasurementRecord {
        MeasurementRecord {
            neck_circumference: 9.0,
            shoulder_width: 9.0,
            chest_circumference: 22.619_467_105_846_5,
            bust_circumference: Some(21.488_493_750_554_17),
            underbust_circumference: Some(19.226_547_039_969_52),
            waist_circumference: 20.357_520_395_261_85,
            arm_length: 22.5,
            bicep_circumference: 2.25,
            wrist_circumference: 4.05,
            shirt_length: 18.0,
            hip_circumference: 22.619_467_105_846_5,
            thigh_circumference: 13.571_680_263_507_9,
            inseam: 18.3,
            outseam: 21.045,
            knee_circumference: 9.500_176_184_455_53,
            calf_circumference: 8.550_158_566_009_977,
            ankle_circumference: 5.130_095_139_605_986,
            height: 45.0,
            weight: None,
            confidence: 0.75,
            captured_at: Utc::now(),
            units: Units::Inches,
        }
    }

    fn assert_close(a: f64, b: f64) {
        let scale = a.abs().max(1.0);
        assert!((a - b).abs() <= 1e-9 * scale, "{a} != {b}");
    }

    #[test]
    fn test_convert_same_unit_is_identity() {
        let record = sample_record();
        assert_eq!(record.convert(Units::Inches), record);
    }

    #[test]
    fn test_convert_round_trip() {
        let record = sample_record();
        let back = record.convert(Units::Cm).convert(Units::Inches);

        assert_close(back.height, record.height);
        assert_close(back.chest_circumference, record.chest_circumference);
        assert_close(back.waist_circumference, record.waist_circumference);
        assert_close(back.inseam, record.inseam);
        assert_close(back.ankle_circumference, record.ankle_circumference);
        assert_eq!(back.units, Units::Inches);
    }

    #[test]
    fn test_convert_scales_lengths_only() {
        let record = sample_record();
        let cm = record.convert(Units::Cm);

        assert_close(cm.height, record.height * CM_PER_INCH);
        assert_close(
            cm.bust_circumference.unwrap(),
            record.bust_circumference.unwrap() * CM_PER_INCH,
        );
        assert_eq!(cm.weight, None);
        assert_eq!(cm.confidence, record.confidence);
        assert_eq!(cm.captured_at, record.captured_at);
        assert_eq!(cm.units, Units::Cm);
    }

    #[test]
    fn test_optional_weight_converted_when_present() {
        let record = MeasurementRecord {
            weight: Some(150.0),
            ..sample_record()
        };
        let cm = record.convert(Units::Cm);
        assert_close(cm.weight.unwrap(), 150.0 * CM_PER_INCH);
    }

    #[test]
    fn test_units_parse() {
        assert_eq!("inches".parse::<Units>().unwrap(), Units::Inches);
        assert_eq!("in".parse::<Units>().unwrap(), Units::Inches);
        assert_eq!("cm".parse::<Units>().unwrap(), Units::Cm);
        assert!("furlongs".parse::<Units>().is_err());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        for key in [
            "neckCircumference",
            "shoulderWidth",
            "chestCircumference",
            "bustCircumference",
            "underbustCircumference",
            "waistCircumference",
            "armLength",
            "bicepCircumference",
            "wristCircumference",
            "shirtLength",
            "hipCircumference",
            "thighCircumference",
            "inseam",
            "outseam",
            "kneeCircumference",
            "calfCircumference",
            "ankleCircumference",
            "height",
            "confidence",
            "capturedAt",
            "units",
        ] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
        }
        // Absent optionals are omitted entirely.
        assert!(!json.contains("\"weight\""));
        assert!(json.contains(r#""units":"inches""#));
    }
}
