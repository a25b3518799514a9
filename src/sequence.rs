use std::collections::BTreeMap;
use std::time::Duration;

use crate::color::Color;
use crate::error::{LumiseqError, LumiseqResult};
use crate::sparse::{FrameAssignment, LightId, TimedAssignment};
use crate::timing::FrameRate;

/// All light changes asserted at one instant. Lights absent from `lights`
/// are unaffected and keep whatever color was last asserted for them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KeyFrame {
    pub time: Duration,
    pub lights: BTreeMap<LightId, Color>,
}

/// The full ordered timeline of a light show: keyframes strictly increasing
/// by time, optionally paired with an audio asset name. Procedural sequences
/// carry no audio.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    pub frames: Vec<KeyFrame>,
    pub audio: Option<String>,
}

impl Sequence {
    /// Collapses a duration-keyed assignment into ordered keyframes, one per
    /// distinct moment. Times are strictly increasing by construction.
    #[tracing::instrument(skip(data))]
    pub fn from_timed(data: &TimedAssignment, audio: Option<String>) -> Self {
        let frames = data
            .iter()
            .map(|(time, lights)| KeyFrame {
                time,
                lights: lights.clone(),
            })
            .collect();
        Self { frames, audio }
    }

    /// Collapses a frame-keyed assignment, converting each frame number to
    /// elapsed time via `rate`. Grouping and ordering are identical to
    /// [`Sequence::from_timed`].
    #[tracing::instrument(skip(data))]
    pub fn from_frames(data: &FrameAssignment, rate: FrameRate, audio: Option<String>) -> Self {
        let frames = data
            .iter()
            .map(|(frame, lights)| KeyFrame {
                time: rate.frame_to_duration(frame),
                lights: lights.clone(),
            })
            .collect();
        Self { frames, audio }
    }

    /// Checks the ordering invariant on sequences that did not come out of
    /// the converters, e.g. deserialized documents.
    pub fn validate(&self) -> LumiseqResult<()> {
        for pair in self.frames.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(LumiseqError::validation(format!(
                    "keyframe times must be strictly increasing: {:?} then {:?}",
                    pair[0].time, pair[1].time
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> LumiseqResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LumiseqError::serde(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::FrameNumber;

    #[test]
    fn from_timed_groups_lights_sharing_a_moment() {
        let mut data = TimedAssignment::new();
        let m0 = Duration::ZERO;
        let m1 = Duration::from_millis(500);
        data.insert(m1, LightId(2), Color::rgb(0, 255, 0));
        data.insert(m0, LightId(1), Color::rgb(255, 0, 0));
        data.insert(m0, LightId(2), Color::rgb(0, 0, 255));

        let seq = Sequence::from_timed(&data, None);
        assert_eq!(seq.frames.len(), 2);
        assert_eq!(seq.frames[0].time, m0);
        assert_eq!(seq.frames[0].lights.len(), 2);
        assert_eq!(
            seq.frames[0].lights.get(&LightId(1)),
            Some(&Color::rgb(255, 0, 0))
        );
        assert_eq!(seq.frames[1].time, m1);
        assert_eq!(seq.frames[1].lights.len(), 1);
        seq.validate().unwrap();
    }

    #[test]
    fn from_frames_converts_via_rate() {
        let mut data = FrameAssignment::new();
        data.insert(FrameNumber(10.0), LightId(3), Color::rgb(1, 2, 3));

        let seq = Sequence::from_frames(&data, FrameRate(39.467), Some("song.mp3".to_string()));
        assert_eq!(seq.frames.len(), 1);
        assert_eq!(seq.frames[0].time, Duration::from_secs_f64(10.0 / 39.467));
        assert_eq!(seq.audio.as_deref(), Some("song.mp3"));
    }

    #[test]
    fn conversion_is_deterministic() {
        let mut data = TimedAssignment::new();
        for i in 0..10 {
            data.insert(
                Duration::from_millis(i * 137),
                LightId((i % 3) as u32 + 1),
                Color::rgb(i as u8, 0, 0),
            );
        }
        let a = Sequence::from_timed(&data, None);
        let b = Sequence::from_timed(&data, None);
        assert_eq!(a, b);
    }

    #[test]
    fn validate_rejects_duplicate_times() {
        let kf = |ms| KeyFrame {
            time: Duration::from_millis(ms),
            lights: BTreeMap::new(),
        };
        let seq = Sequence {
            frames: vec![kf(0), kf(10), kf(10)],
            audio: None,
        };
        assert!(seq.validate().is_err());
    }

    #[test]
    fn json_roundtrip() {
        let mut data = TimedAssignment::new();
        data.insert(Duration::ZERO, LightId(1), Color::rgb(255, 160, 72));
        let seq = Sequence::from_timed(&data, Some("jingle.mp3".to_string()));

        let s = seq.to_json().unwrap();
        let de: Sequence = serde_json::from_str(&s).unwrap();
        assert_eq!(de, seq);
    }
}
