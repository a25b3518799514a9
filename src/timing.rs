use std::time::Duration;

use crate::error::{LumiseqError, LumiseqResult};
use crate::sparse::{FrameAssignment, FrameNumber};

/// Minimum gap between distinct frame moments in parsed timing data, in
/// frame units. Closer markers would collapse into one hardware refresh.
pub const MIN_FRAME_SEPARATION: f64 = 0.5;

/// Playback rate of the light controller this data ultimately drives.
pub const SEQUENCE_FRAME_RATE: FrameRate = FrameRate(39.467);

/// Frames per second used to convert frame numbers into elapsed time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRate(pub f64);

impl FrameRate {
    /// Elapsed time of `frame`: `frame / rate` seconds.
    pub fn frame_to_duration(self, frame: FrameNumber) -> Duration {
        Duration::from_secs_f64(frame.0 / self.0)
    }
}

/// Checks that the distinct frame moments in parser-sourced data are at
/// least [`MIN_FRAME_SEPARATION`] apart.
///
/// Generator output is exempt; generators construct their timing directly
/// under their own constraints.
pub fn validate_frame_spacing(data: &FrameAssignment) -> LumiseqResult<()> {
    let mut moments = data.moments();
    let Some(mut previous) = moments.next() else {
        return Ok(());
    };
    for frame in moments {
        if frame.0 - previous.0 < MIN_FRAME_SEPARATION {
            return Err(LumiseqError::FrameSpacing {
                prev: previous.0,
                next: frame.0,
                min: MIN_FRAME_SEPARATION,
            });
        }
        previous = frame;
    }
    Ok(())
}
