//! Blob colors and the injectable palette they are drawn from.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Named blob fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobColor {
    Pink,
    Blue,
    Yellow,
    Red,
    Teal,
}

impl BlobColor {
    /// Color used when a palette yields no pick.
    pub const FALLBACK: Self = Self::Blue;

    pub const ALL: [Self; 5] = [Self::Pink, Self::Blue, Self::Yellow, Self::Red, Self::Teal];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Teal => "teal",
        }
    }

    /// sRGB components of the system color in light appearance.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Pink => [0xFF, 0x2D, 0x55],
            Self::Blue => [0x00, 0x7A, 0xFF],
            Self::Yellow => [0xFF, 0xCC, 0x00],
            Self::Red => [0xFF, 0x3B, 0x30],
            Self::Teal => [0x30, 0xB0, 0xC7],
        }
    }

    /// `#RRGGBB` form of [`BlobColor::rgb`].
    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

/// Allowed blob colors, passed explicitly to each tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<BlobColor>,
}

impl Palette {
    pub fn new(colors: impl Into<Vec<BlobColor>>) -> Self {
        Self {
            colors: colors.into(),
        }
    }

    /// Degenerate palette that always yields `color`.
    pub fn single(color: BlobColor) -> Self {
        Self::new(vec![color])
    }

    pub fn colors(&self) -> &[BlobColor] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: BlobColor) -> bool {
        self.colors.contains(&color)
    }

    /// Uniform pick; an empty palette yields [`BlobColor::FALLBACK`].
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> BlobColor {
        self.colors
            .choose(rng)
            .copied()
            .unwrap_or(BlobColor::FALLBACK)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(BlobColor::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobColor, Palette};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_palette_falls_back_to_blue() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Palette::new(Vec::new()).pick(&mut rng), BlobColor::Blue);
    }

    #[test]
    fn default_palette_eventually_yields_every_color() {
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let color = palette.pick(&mut rng);
            if !seen.contains(&color) {
                seen.push(color);
            }
        }
        assert_eq!(seen.len(), BlobColor::ALL.len());
    }

    #[test]
    fn hex_is_uppercase_rrggbb() {
        assert_eq!(BlobColor::Blue.hex(), "#007AFF");
        assert_eq!(BlobColor::Teal.hex(), "#30B0C7");
    }

    #[test]
    fn palette_serializes_as_color_names() {
        let palette = Palette::new(vec![BlobColor::Red, BlobColor::Teal]);
        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json, serde_json::json!(["red", "teal"]));
    }
}
