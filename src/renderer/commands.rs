//! Scene composition
//!
//! Turns a [`GameState`] into an ordered, back-to-front list of draw
//! commands. Pure: the same state and settings always compose the same frame.

use glam::Vec2;

use crate::assets::{Assets, Color, SpriteId};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;

/// Screen position of the score overlay
pub const SCORE_POS: Vec2 = Vec2::new(10.0, 10.0);

/// Glyph height of text runs, in screen pixels
pub const TEXT_SIZE: f32 = 24.0;

/// One drawing primitive, in screen pixels with the origin top-left
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole frame
    Fill(Color),
    Blit { sprite: SpriteId, pos: Vec2 },
    /// Blit mirrored top-to-bottom
    BlitFlipped { sprite: SpriteId, pos: Vec2 },
    /// Blit rotated counter-clockwise about the sprite center
    BlitRotated {
        sprite: SpriteId,
        pos: Vec2,
        angle_deg: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        color: Color,
    },
    Present,
}

impl DrawCommand {
    pub fn sprite(&self) -> Option<SpriteId> {
        match self {
            DrawCommand::Blit { sprite, .. }
            | DrawCommand::BlitFlipped { sprite, .. }
            | DrawCommand::BlitRotated { sprite, .. } => Some(*sprite),
            _ => None,
        }
    }
}

/// Score overlay text
pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

/// Compose one frame.
///
/// Order: sky, clouds, billboard, pipes (top then flipped bottom), drone,
/// floor, score, present.
pub fn compose(state: &GameState, assets: &Assets, settings: &Settings) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(8 + CLOUD_COUNT + state.obstacles.len() * 2);

    commands.push(DrawCommand::Fill(assets.sky));

    if settings.clouds {
        commands.extend(state.clouds.clouds.iter().map(|cloud| DrawCommand::Blit {
            sprite: SpriteId::Cloud,
            pos: Vec2::new(cloud.x, cloud.y),
        }));
    }

    if settings.billboard {
        if let Some(billboard) = &state.billboard.billboard {
            commands.push(DrawCommand::Blit {
                sprite: SpriteId::Billboard,
                pos: Vec2::new(billboard.x, billboard.y),
            });
        }
    }

    for pipe in &state.obstacles.pipes {
        commands.push(DrawCommand::Blit {
            sprite: SpriteId::Pipe,
            pos: Vec2::new(pipe.x, pipe.height - PIPE_HEIGHT),
        });
        commands.push(DrawCommand::BlitFlipped {
            sprite: SpriteId::Pipe,
            pos: Vec2::new(pipe.x, pipe.bottom_y()),
        });
    }

    let avatar_pos = Vec2::new(state.avatar.x, state.avatar.y);
    if settings.effective_avatar_tilt() && state.avatar.rotation != 0.0 {
        commands.push(DrawCommand::BlitRotated {
            sprite: SpriteId::Avatar,
            pos: avatar_pos,
            angle_deg: state.avatar.rotation,
        });
    } else {
        commands.push(DrawCommand::Blit {
            sprite: SpriteId::Avatar,
            pos: avatar_pos,
        });
    }

    commands.push(DrawCommand::Blit {
        sprite: SpriteId::Floor,
        pos: Vec2::new(0.0, FLOOR_LINE),
    });

    commands.push(DrawCommand::Text {
        text: score_text(state.score),
        pos: SCORE_POS,
        color: assets.text,
    });

    commands.push(DrawCommand::Present);
    commands
}
