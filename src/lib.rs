#![forbid(unsafe_code)]

pub mod color;
pub mod error;
pub mod generate;
pub mod parse;
pub mod sequence;
pub mod sparse;
pub mod timing;

pub use color::{Color, PALETTE};
pub use error::{LumiseqError, LumiseqResult};
pub use generate::{GeneratorConfig, GeneratorKind, generate, generate_rainbow, generate_twinkle};
pub use parse::parse_csv;
pub use sequence::{KeyFrame, Sequence};
pub use sparse::{FrameAssignment, FrameNumber, LightId, SparseAssignment, TimedAssignment};
pub use timing::{FrameRate, MIN_FRAME_SEPARATION, SEQUENCE_FRAME_RATE, validate_frame_spacing};
