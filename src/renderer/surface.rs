//! Rendering boundary
//!
//! [`Surface`] is the set of primitives the composed draw commands need.
//! [`MeshSurface`] implements it by building colored triangles that the wgpu
//! pipeline uploads as-is; text runs are collected for the HUD.

use glam::Vec2;

use super::RenderError;
use super::commands::DrawCommand;
use super::shapes::{Placement, place, sprite_mesh};
use super::vertex::Vertex;
use crate::assets::{Assets, Color, SpriteId};

/// Drawing target
pub trait Surface {
    fn fill(&mut self, color: Color);
    fn blit(&mut self, sprite: SpriteId, pos: Vec2);
    fn blit_flipped(&mut self, sprite: SpriteId, pos: Vec2);
    fn blit_rotated(&mut self, sprite: SpriteId, pos: Vec2, angle_deg: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Replay draw commands onto a surface, in order
pub fn execute<S: Surface + ?Sized>(
    surface: &mut S,
    commands: &[DrawCommand],
) -> Result<(), RenderError> {
    for command in commands {
        match command {
            DrawCommand::Fill(color) => surface.fill(*color),
            DrawCommand::Blit { sprite, pos } => surface.blit(*sprite, *pos),
            DrawCommand::BlitFlipped { sprite, pos } => surface.blit_flipped(*sprite, *pos),
            DrawCommand::BlitRotated {
                sprite,
                pos,
                angle_deg,
            } => surface.blit_rotated(*sprite, *pos, *angle_deg),
            DrawCommand::Text { text, pos, color } => surface.draw_text(text, *pos, *color),
            DrawCommand::Present => surface.present()?,
        }
    }
    Ok(())
}

/// Text placed on the frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
}

/// A finished frame ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear: Color,
    /// Triangle list in screen pixels
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextRun>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            clear: Color::BLACK,
            vertices: Vec::new(),
            texts: Vec::new(),
        }
    }
}

/// Surface that turns blits into triangles
pub struct MeshSurface {
    /// Local-space mesh and size, indexed by `SpriteId::index`
    meshes: [(Vec<Vertex>, Vec2); SpriteId::ALL.len()],
    pending: Frame,
    presented: Option<Frame>,
    frames_presented: u64,
}

impl MeshSurface {
    pub fn new(assets: &Assets) -> Self {
        let meshes = SpriteId::ALL.map(|id| {
            let sprite = assets.sprite(id);
            (
                sprite_mesh(id, sprite),
                Vec2::new(sprite.width, sprite.height),
            )
        });
        Self {
            meshes,
            pending: Frame::default(),
            presented: None,
            frames_presented: 0,
        }
    }

    /// Take the most recently presented frame
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.presented.take()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn push_sprite(&mut self, sprite: SpriteId, placement: Placement) {
        let (mesh, size) = &self.meshes[sprite.index()];
        self.pending.vertices.extend(place(mesh, *size, placement));
    }
}

impl Surface for MeshSurface {
    fn fill(&mut self, color: Color) {
        // Everything drawn so far is covered
        self.pending.vertices.clear();
        self.pending.texts.clear();
        self.pending.clear = color;
    }

    fn blit(&mut self, sprite: SpriteId, pos: Vec2) {
        self.push_sprite(
            sprite,
            Placement {
                pos,
                ..Default::default()
            },
        );
    }

    fn blit_flipped(&mut self, sprite: SpriteId, pos: Vec2) {
        self.push_sprite(
            sprite,
            Placement {
                pos,
                flip_vertical: true,
                ..Default::default()
            },
        );
    }

    fn blit_rotated(&mut self, sprite: SpriteId, pos: Vec2, angle_deg: f32) {
        self.push_sprite(
            sprite,
            Placement {
                pos,
                angle_deg,
                ..Default::default()
            },
        );
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.pending.texts.push(TextRun {
            text: text.to_string(),
            pos,
            color,
        });
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.presented = Some(std::mem::take(&mut self.pending));
        self.frames_presented += 1;
        Ok(())
    }
}
