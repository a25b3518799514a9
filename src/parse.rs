use crate::color::{Color, WHITE_SUBSTITUTE};
use crate::error::LumiseqResult;
use crate::sparse::{FrameAssignment, FrameNumber, LightId};
use crate::timing::validate_frame_spacing;

/// Columns: light id, frame number, (unused), red, green, blue.
const MIN_FIELDS: usize = 6;

/// Decodes a row-oriented timing export into a frame-keyed assignment.
///
/// Malformed rows (too few fields, or a required field failing to parse) are
/// skipped rather than failing the batch; skips are logged and counted but
/// never fatal. Rows repeating a (frame, light) pair overwrite the earlier
/// row. Frame spacing is validated after all rows are consumed and a
/// violation aborts the whole parse.
#[tracing::instrument(skip(text))]
pub fn parse_csv(text: &str) -> LumiseqResult<FrameAssignment> {
    let mut data = FrameAssignment::new();
    let mut skipped = 0usize;

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some((frame, light, color)) => {
                data.insert(frame, light, color);
            }
            None => {
                skipped += 1;
                tracing::debug!(line = idx + 1, "skipping malformed row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "ignored malformed rows in timing data");
    }

    validate_frame_spacing(&data)?;
    Ok(data)
}

fn parse_row(line: &str) -> Option<(FrameNumber, LightId, Color)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }
    let light = fields[0].trim().parse::<u32>().ok()?;
    let frame = fields[1].trim().parse::<f64>().ok()?;
    // Frame positions must be non-negative and finite to convert to
    // elapsed time; anything else is a malformed row.
    if !frame.is_finite() || frame < 0.0 {
        return None;
    }
    let r = fields[3].trim().parse::<u8>().ok()?;
    let g = fields[4].trim().parse::<u8>().ok()?;
    let b = fields[5].trim().parse::<u8>().ok()?;

    let mut color = Color::rgb(r, g, b);
    if color == Color::rgb(255, 255, 255) {
        color = WHITE_SUBSTITUTE;
    }
    Some((FrameNumber(frame), LightId(light), color))
}
