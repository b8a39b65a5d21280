use serde::{Deserialize, Serialize};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// `#rrggbb`, alpha ignored.
    #[must_use]
    pub fn to_hex(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }
}

/// Bar palette, picked for contrast on a light grid.
pub const BAR_PALETTE: [Color; 12] = [
    Color::rgb(0.259, 0.522, 0.957),
    Color::rgb(0.204, 0.659, 0.325),
    Color::rgb(0.984, 0.737, 0.020),
    Color::rgb(0.918, 0.263, 0.208),
    Color::rgb(0.608, 0.349, 0.714),
    Color::rgb(0.000, 0.675, 0.757),
    Color::rgb(1.000, 0.439, 0.263),
    Color::rgb(0.475, 0.333, 0.282),
    Color::rgb(0.314, 0.412, 0.533),
    Color::rgb(0.545, 0.765, 0.290),
    Color::rgb(0.914, 0.118, 0.388),
    Color::rgb(0.247, 0.318, 0.710),
];

/// Stable palette color for an identifier.
#[must_use]
pub fn color_for_key(key: &str) -> Color {
    let index = (fnv1a64(key.as_bytes()) % BAR_PALETTE.len() as u64) as usize;
    BAR_PALETTE[index]
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}
