// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Guided capture step definitions.
//!
//! A measurement session walks the subject through five poses in a fixed
//! order. The order is a contract: the synthesizer selects front/side/arms
//! snapshots by step id out of the sequence this module defines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of one guided capture pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepId {
    /// Facing the camera, arms at the sides.
    #[serde(rename = "front")]
    Front,
    /// Right side profile.
    #[serde(rename = "side-right")]
    SideRight,
    /// Facing away from the camera.
    #[serde(rename = "back")]
    Back,
    /// Left side profile.
    #[serde(rename = "side-left")]
    SideLeft,
    /// Facing the camera with both arms extended horizontally.
    #[serde(rename = "front-arms")]
    FrontArms,
}

impl StepId {
    /// Returns the wire/string representation of the step id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::SideRight => "side-right",
            Self::Back => "back",
            Self::SideLeft => "side-left",
            Self::FrontArms => "front-arms",
        }
    }

    /// Returns whether this step faces the camera head-on.
    #[must_use]
    pub const fn is_front_facing(&self) -> bool {
        matches!(self, Self::Front | Self::FrontArms)
    }

    /// Returns whether this step is a side profile.
    #[must_use]
    pub const fn is_side(&self) -> bool {
        matches!(self, Self::SideRight | Self::SideLeft)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepId {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "side-right" => Ok(Self::SideRight),
            "back" => Ok(Self::Back),
            "side-left" => Ok(Self::SideLeft),
            "front-arms" => Ok(Self::FrontArms),
            _ => Err(StepParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid step-id string.
#[derive(Debug, Clone)]
pub struct StepParseError(String);

impl fmt::Display for StepParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid step '{}', expected one of: front, side-right, back, side-left, front-arms",
            self.0
        )
    }
}

impl std::error::Error for StepParseError {}

/// One entry of the guided capture sequence.
///
/// The table is static, process-wide, and immutable.
#[derive(Debug, Clone, Copy)]
pub struct PoseStep {
    /// Step identifier.
    pub id: StepId,
    /// Short on-screen title.
    pub title: &'static str,
    /// One-line description of the pose.
    pub description: &'static str,
    /// Full instruction shown while the subject positions themselves.
    pub instruction: &'static str,
    /// Suggested hold duration in milliseconds.
    pub duration_ms: u64,
    /// Body rotation relative to the camera, in degrees.
    pub target_angle_degrees: u16,
}

/// The five guided capture steps, in capture order.
static POSE_STEPS: [PoseStep; 5] = [
    PoseStep {
        id: StepId::Front,
        title: "Front View",
        description: "Stand facing the camera",
        instruction: "Stand straight with arms at your sides, looking directly at the camera",
        duration_ms: 3000,
        target_angle_degrees: 0,
    },
    PoseStep {
        id: StepId::SideRight,
        title: "Right Side",
        description: "Turn 90° to your right",
        instruction: "Turn to show your right side profile, arms at your sides",
        duration_ms: 3000,
        target_angle_degrees: 90,
    },
    PoseStep {
        id: StepId::Back,
        title: "Back View",
        description: "Turn to show your back",
        instruction: "Turn completely around to show your back, arms at your sides",
        duration_ms: 3000,
        target_angle_degrees: 180,
    },
    PoseStep {
        id: StepId::SideLeft,
        title: "Left Side",
        description: "Turn 90° to your left",
        instruction: "Turn to show your left side profile, arms at your sides",
        duration_ms: 3000,
        target_angle_degrees: 270,
    },
    PoseStep {
        id: StepId::FrontArms,
        title: "Arms Extended",
        description: "Face camera with arms out",
        instruction: "Face the camera and extend both arms horizontally",
        duration_ms: 3000,
        target_angle_degrees: 0,
    },
];

/// The guided capture sequence.
#[must_use]
pub const fn pose_steps() -> &'static [PoseStep; 5] {
    &POSE_STEPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_from_str() {
        assert_eq!("front".parse::<StepId>().unwrap(), StepId::Front);
        assert_eq!("side-right".parse::<StepId>().unwrap(), StepId::SideRight);
        assert_eq!("back".parse::<StepId>().unwrap(), StepId::Back);
        assert_eq!("side-left".parse::<StepId>().unwrap(), StepId::SideLeft);
        assert_eq!("front-arms".parse::<StepId>().unwrap(), StepId::FrontArms);
        assert_eq!("FRONT".parse::<StepId>().unwrap(), StepId::Front);
        assert!("side".parse::<StepId>().is_err());
    }

    #[test]
    fn test_step_display_round_trip() {
        for step in pose_steps() {
            assert_eq!(step.id.to_string().parse::<StepId>().unwrap(), step.id);
        }
    }

    #[test]
    fn test_sequence_order_is_fixed() {
        let ids: Vec<StepId> = pose_steps().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                StepId::Front,
                StepId::SideRight,
                StepId::Back,
                StepId::SideLeft,
                StepId::FrontArms,
            ]
        );

        let angles: Vec<u16> = pose_steps().iter().map(|s| s.target_angle_degrees).collect();
        assert_eq!(angles, vec![0, 90, 180, 270, 0]);
    }

    #[test]
    fn test_step_capabilities() {
        assert!(StepId::Front.is_front_facing());
        assert!(StepId::FrontArms.is_front_facing());
        assert!(StepId::SideLeft.is_side());
        assert!(!StepId::Back.is_front_facing());
        assert!(!StepId::Back.is_side());
    }

    #[test]
    fn test_serde_wire_form() {
        assert_eq!(serde_json::to_string(&StepId::SideRight).unwrap(), r#""side-right""#);
        let id: StepId = serde_json::from_str(r#""front-arms""#).unwrap();
        assert_eq!(id, StepId::FrontArms);
    }
}
