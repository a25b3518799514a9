/// Straight RGB8. Equality is component-wise; "off" is all zeros.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// A light showing no color at all.
    pub const OFF: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_off(self) -> bool {
        self == Self::OFF
    }
}

/// Reference colors the procedural generators cycle through, ordered as a
/// red-to-red hue wheel.
pub const PALETTE: [Color; 9] = [
    Color::rgb(255, 0, 0),
    Color::rgb(255, 78, 0),
    Color::rgb(255, 231, 0),
    Color::rgb(81, 255, 0),
    Color::rgb(0, 255, 140),
    Color::rgb(0, 140, 255),
    Color::rgb(81, 0, 255),
    Color::rgb(255, 0, 231),
    Color::rgb(255, 0, 78),
];

/// Pure white oversaturates the target pixel hardware; parsed input swaps it
/// for this calibrated warm white.
pub const WHITE_SUBSTITUTE: Color = Color::rgb(255, 160, 72);
