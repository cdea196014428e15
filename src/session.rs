// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Capture session state machine.
//!
//! Sequences the five guided pose captures. The machine is an explicit
//! finite-state machine with a pure transition function: each event yields
//! a new state plus a [`SessionEffect`] describing what happened, with no
//! rendering concern attached. A failed commit (no live skeleton) is a
//! local, recoverable outcome: the machine returns to awaiting the same
//! step and never treats it as a session failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};
use crate::geometry::is_live;
use crate::landmarks::Skeleton;
use crate::source::PoseFrameSource;
use crate::step::{PoseStep, StepId, pose_steps};

/// One committed capture: the frame image, the skeleton that satisfied the
/// step, and when it was taken.
///
/// Snapshots are owned by the session that created them until the whole
/// batch is handed to the synthesizer; they are never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedSnapshot {
    /// Encoded still image of the captured frame.
    #[serde(rename = "imageData")]
    pub image: Vec<u8>,
    /// Detected landmarks at commit time.
    #[serde(rename = "landmarks")]
    pub skeleton: Skeleton,
    /// World-space landmarks, when the detector provided them.
    #[serde(
        default,
        rename = "worldLandmarks",
        skip_serializing_if = "Option::is_none"
    )]
    pub world_skeleton: Option<Skeleton>,
    /// The guided step this snapshot satisfies.
    #[serde(rename = "stepId")]
    pub step_id: StepId,
    /// Commit timestamp.
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

/// Capture session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the subject to start capturing the step at this index.
    AwaitingCapture { step: usize },
    /// Counting down to an automatic capture of the step at this index.
    Countdown { step: usize, remaining: u32 },
    /// All five steps captured; terminal.
    Complete,
}

/// Events the capture surface can deliver to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Start a capture with the given countdown timer (0 = immediate).
    BeginCapture { timer_seconds: u32 },
    /// One second of countdown elapsed.
    Tick,
    /// Abort the pending countdown.
    CancelCapture,
}

/// Observable outcome of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Countdown started for the step.
    CountdownStarted { step: StepId, remaining: u32 },
    /// Countdown advanced without reaching zero.
    CountdownTicked { step: StepId, remaining: u32 },
    /// Commit attempted but no live skeleton was available; the step must
    /// be retaken.
    CaptureFailed { step: StepId },
    /// Snapshot committed; the session advanced to the next step.
    SnapshotCommitted { step: StepId },
    /// Final snapshot committed; the session is complete.
    SessionCompleted,
    /// Pending countdown cancelled, no side effects.
    Cancelled { step: StepId },
    /// Event not valid in the current state; state unchanged.
    Rejected,
}

/// Guided capture session over the five-step pose sequence.
///
/// A session is single-use: once [`SessionState::Complete`] is reached the
/// snapshot batch is consumed with [`CaptureSession::into_snapshots`] and a
/// new scan requires a fresh instance.
#[derive(Debug)]
pub struct CaptureSession {
    steps: &'static [PoseStep],
    state: SessionState,
    snapshots: Vec<CapturedSnapshot>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    /// Create a session at the first guided step.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: pose_steps(),
            state: SessionState::AwaitingCapture { step: 0 },
            snapshots: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The step the session is currently gathering, if not complete.
    #[must_use]
    pub fn current_step(&self) -> Option<&'static PoseStep> {
        match self.state {
            SessionState::AwaitingCapture { step } | SessionState::Countdown { step, .. } => {
                self.steps.get(step)
            }
            SessionState::Complete => None,
        }
    }

    /// Snapshots committed so far, in capture order.
    #[must_use]
    pub fn snapshots(&self) -> &[CapturedSnapshot] {
        &self.snapshots
    }

    /// Whether the session has captured all steps.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Complete)
    }

    /// Apply one event against the current frame source.
    ///
    /// The source is only sampled when a commit is attempted; ticks and
    /// cancels never touch it.
    pub fn handle<S: PoseFrameSource>(&mut self, event: SessionEvent, source: &S) -> SessionEffect {
        match (self.state, event) {
            (
                SessionState::AwaitingCapture { step },
                SessionEvent::BeginCapture { timer_seconds },
            ) => {
                if timer_seconds == 0 {
                    return self.commit(step, source);
                }
                self.state = SessionState::Countdown {
                    step,
                    remaining: timer_seconds,
                };
                SessionEffect::CountdownStarted {
                    step: self.steps[step].id,
                    remaining: timer_seconds,
                }
            }
            (SessionState::Countdown { step, remaining }, SessionEvent::Tick) => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    return self.commit(step, source);
                }
                self.state = SessionState::Countdown { step, remaining };
                SessionEffect::CountdownTicked {
                    step: self.steps[step].id,
                    remaining,
                }
            }
            (SessionState::Countdown { step, .. }, SessionEvent::CancelCapture) => {
                self.state = SessionState::AwaitingCapture { step };
                SessionEffect::Cancelled {
                    step: self.steps[step].id,
                }
            }
            _ => SessionEffect::Rejected,
        }
    }

    /// Start a capture for the current step.
    pub fn begin_capture<S: PoseFrameSource>(
        &mut self,
        timer_seconds: u32,
        source: &S,
    ) -> SessionEffect {
        self.handle(SessionEvent::BeginCapture { timer_seconds }, source)
    }

    /// Advance a pending countdown by one second.
    pub fn tick<S: PoseFrameSource>(&mut self, source: &S) -> SessionEffect {
        self.handle(SessionEvent::Tick, source)
    }

    /// Cancel a pending countdown.
    ///
    /// Valid only while counting down; cancellation has no other side
    /// effects and never samples the frame source.
    pub fn cancel_capture(&mut self) -> SessionEffect {
        match self.state {
            SessionState::Countdown { step, .. } => {
                self.state = SessionState::AwaitingCapture { step };
                SessionEffect::Cancelled {
                    step: self.steps[step].id,
                }
            }
            _ => SessionEffect::Rejected,
        }
    }

    /// Consume the completed session, yielding the ordered snapshot batch.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::Validation`] if the session has not reached
    /// [`SessionState::Complete`].
    pub fn into_snapshots(self) -> Result<Vec<CapturedSnapshot>> {
        if self.is_complete() {
            Ok(self.snapshots)
        } else {
            Err(MeasureError::Validation(
                "capture session is not complete".to_string(),
            ))
        }
    }

    /// Attempt to commit the current frame for `step`.
    ///
    /// The commit gate is skeleton liveness; a missing or empty skeleton
    /// (or an unreadable frame image) returns the machine to awaiting the
    /// same step with nothing recorded.
    fn commit<S: PoseFrameSource>(&mut self, step: usize, source: &S) -> SessionEffect {
        let step_id = self.steps[step].id;

        let Some(skeleton) = source.current_skeleton().filter(is_live) else {
            self.state = SessionState::AwaitingCapture { step };
            return SessionEffect::CaptureFailed { step: step_id };
        };

        let Ok(image) = source.capture_frame() else {
            self.state = SessionState::AwaitingCapture { step };
            return SessionEffect::CaptureFailed { step: step_id };
        };

        self.snapshots.push(CapturedSnapshot {
            image,
            skeleton,
            world_skeleton: source.current_world_skeleton(),
            step_id,
            captured_at: Utc::now(),
        });

        if step + 1 < self.steps.len() {
            self.state = SessionState::AwaitingCapture { step: step + 1 };
            SessionEffect::SnapshotCommitted { step: step_id }
        } else {
            self.state = SessionState::Complete;
            SessionEffect::SessionCompleted
        }
    }
}
