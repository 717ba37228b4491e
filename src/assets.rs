//! Sprite manifest
//!
//! Sprites are drawn procedurally, but their pixel sizes and palettes come
//! from a JSON manifest that is parsed and validated once at startup. The
//! simulation sizes its collision boxes from the same numbers, so a manifest
//! whose dimensions disagree with the compiled-in ones is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Manifest bundled with the game
pub const BUILTIN_MANIFEST: &str = include_str!("../assets/manifest.json");

/// Failure to load the sprite manifest. Always fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("malformed sprite manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid color {value:?}: expected #rrggbb or #rrggbbaa")]
    InvalidColor { value: String },
    #[error("sprite {sprite:?} has non-positive size {width}x{height}")]
    EmptySprite {
        sprite: SpriteId,
        width: f32,
        height: f32,
    },
    #[error("sprite {sprite:?} is {actual:?} but the game is built for {expected:?}")]
    SizeMismatch {
        sprite: SpriteId,
        expected: (f32, f32),
        actual: (f32, f32),
    },
    #[error("sprite {sprite:?} needs {needed} palette colors, found {found}")]
    ShortPalette {
        sprite: SpriteId,
        needed: usize,
        found: usize,
    },
}

/// Opaque sprite handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteId {
    Avatar,
    Pipe,
    Floor,
    Cloud,
    Billboard,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Avatar,
        SpriteId::Pipe,
        SpriteId::Floor,
        SpriteId::Cloud,
        SpriteId::Billboard,
    ];

    /// Position in [`SpriteId::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Pixel size the simulation assumes for this sprite
    pub fn expected_size(self) -> (f32, f32) {
        match self {
            SpriteId::Avatar => (AVATAR_WIDTH, AVATAR_HEIGHT),
            SpriteId::Pipe => (PIPE_WIDTH, PIPE_HEIGHT),
            SpriteId::Floor => (SCREEN_WIDTH, FLOOR_HEIGHT),
            SpriteId::Cloud => (CLOUD_WIDTH, CLOUD_HEIGHT),
            SpriteId::Billboard => (BILLBOARD_WIDTH, BILLBOARD_HEIGHT),
        }
    }

    /// Number of palette entries the procedural art reads
    pub fn palette_len(self) -> usize {
        match self {
            SpriteId::Avatar => 4,
            SpriteId::Pipe => 3,
            SpriteId::Floor => 3,
            SpriteId::Cloud => 2,
            SpriteId::Billboard => 4,
        }
    }
}

/// sRGB color with straight alpha, parsed from a hex string
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);

    pub fn parse(value: &str) -> Result<Self, AssetError> {
        let invalid = || AssetError::InvalidColor {
            value: value.to_string(),
        };
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let mut channels = [1.0f32; 4];
        for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
            *channel = byte as f32 / 255.0;
        }
        Ok(Color(channels))
    }

    /// CSS `rgba()` form, for text drawn outside the GPU surface
    pub fn to_css(self) -> String {
        let [r, g, b, a] = self.0;
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({}, {}, {}, {})", byte(r), byte(g), byte(b), a.clamp(0.0, 1.0))
    }
}

impl TryFrom<String> for Color {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// One sprite's dimensions and palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
    pub palette: Vec<Color>,
}

impl Sprite {
    /// Palette entry, white if out of range
    pub fn color(&self, index: usize) -> Color {
        self.palette.get(index).copied().unwrap_or(Color::WHITE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub avatar: Sprite,
    pub pipe: Sprite,
    pub floor: Sprite,
    pub cloud: Sprite,
    pub billboard: Sprite,
}

/// Validated asset manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    /// Background fill
    pub sky: Color,
    /// Score overlay color
    pub text: Color,
    pub sprites: SpriteSet,
}

impl Assets {
    /// Load the manifest bundled with the binary
    pub fn builtin() -> Result<Self, AssetError> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    /// Parse and validate a manifest
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let assets: Assets = serde_json::from_str(json)?;
        assets.validate()?;
        log::debug!("Sprite manifest loaded ({} sprites)", SpriteId::ALL.len());
        Ok(assets)
    }

    pub fn sprite(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::Avatar => &self.sprites.avatar,
            SpriteId::Pipe => &self.sprites.pipe,
            SpriteId::Floor => &self.sprites.floor,
            SpriteId::Cloud => &self.sprites.cloud,
            SpriteId::Billboard => &self.sprites.billboard,
        }
    }

    fn validate(&self) -> Result<(), AssetError> {
        for id in SpriteId::ALL {
            let sprite = self.sprite(id);
            if sprite.width <= 0.0 || sprite.height <= 0.0 {
                return Err(AssetError::EmptySprite {
                    sprite: id,
                    width: sprite.width,
                    height: sprite.height,
                });
            }
            let expected = id.expected_size();
            let actual = (sprite.width, sprite.height);
            if actual != expected {
                return Err(AssetError::SizeMismatch {
                    sprite: id,
                    expected,
                    actual,
                });
            }
            if sprite.palette.len() < id.palette_len() {
                return Err(AssetError::ShortPalette {
                    sprite: id,
                    needed: id.palette_len(),
                    found: sprite.palette.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_manifest_is_valid() {
        let assets = Assets::builtin().unwrap();
        for id in SpriteId::ALL {
            let sprite = assets.sprite(id);
            assert_eq!((sprite.width, sprite.height), id.expected_size());
        }
    }

    #[test]
    fn test_sprite_index_matches_all_order() {
        for (i, id) in SpriteId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_color_to_css() {
        assert_eq!(Color::WHITE.to_css(), "rgba(255, 255, 255, 1)");
        assert_eq!(Color([0.0, 0.5, 1.0, 0.5]).to_css(), "rgba(0, 128, 255, 0.5)");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#000000ff").unwrap(), Color::BLACK);
        let c = Color::parse("#ff000080").unwrap();
        assert_eq!(c.0[0], 1.0);
        assert!((c.0[3] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_parse_rejects_garbage() {
        for bad in ["ffffff", "#fff", "#gggggg", "#12345", "#ééé"] {
            assert!(
                matches!(Color::parse(bad), Err(AssetError::InvalidColor { .. })),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_missing_sprite_is_parse_error() {
        let json = BUILTIN_MANIFEST.replace("\"cloud\"", "\"fog\"");
        assert!(matches!(Assets::from_json(&json), Err(AssetError::Parse(_))));
    }

    #[test]
    fn test_wrong_size_rejected() {
        let json = BUILTIN_MANIFEST.replace("\"width\": 90", "\"width\": 64");
        match Assets::from_json(&json) {
            Err(AssetError::SizeMismatch { sprite, .. }) => assert_eq!(sprite, SpriteId::Avatar),
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        let json = BUILTIN_MANIFEST.replace("\"height\": 350", "\"height\": 0");
        assert!(matches!(
            Assets::from_json(&json),
            Err(AssetError::EmptySprite {
                sprite: SpriteId::Billboard,
                ..
            })
        ));
    }

    #[test]
    fn test_short_palette_rejected() {
        let json = BUILTIN_MANIFEST.replace(
            "[\"#ffffff\", \"#e8f1f8\"]",
            "[\"#ffffff\"]",
        );
        assert!(matches!(
            Assets::from_json(&json),
            Err(AssetError::ShortPalette {
                sprite: SpriteId::Cloud,
                needed: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_palette_fallback() {
        let sprite = Sprite {
            width: 1.0,
            height: 1.0,
            palette: vec![Color::BLACK],
        };
        assert_eq!(sprite.color(0), Color::BLACK);
        assert_eq!(sprite.color(5), Color::WHITE);
    }
}
