//! Shape generation for 2D primitives and the procedural sprite art
//!
//! Sprite meshes are built in sprite-local pixels (origin top-left, y down,
//! spanning the sprite's width and height) and then placed on screen with
//! [`place`].

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::assets::{Color, Sprite, SpriteId};

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: Color) -> [Vertex; 6] {
    let a = Vertex::at(min, color);
    let b = Vertex::at(Vec2::new(max.x, min.y), color);
    let c = Vertex::at(max, color);
    let d = Vertex::at(Vec2::new(min.x, max.y), color);
    [a, b, c, a, c, d]
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + Vec2::new(radii.x * theta1.cos(), radii.y * theta1.sin()),
            color,
        ));
        vertices.push(Vertex::at(
            center + Vec2::new(radii.x * theta2.cos(), radii.y * theta2.sin()),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Mesh for a sprite in its local pixel space
pub fn sprite_mesh(id: SpriteId, sprite: &Sprite) -> Vec<Vertex> {
    let size = Vec2::new(sprite.width, sprite.height);
    // Art is authored on the nominal size and scaled to the manifest size
    let (nominal_w, nominal_h) = id.expected_size();
    let scale = size / Vec2::new(nominal_w, nominal_h);

    let mut v = match id {
        SpriteId::Avatar => drone(sprite),
        SpriteId::Pipe => pipe(sprite),
        SpriteId::Floor => floor(sprite),
        SpriteId::Cloud => cloud(sprite),
        SpriteId::Billboard => billboard(sprite),
    };
    if scale != Vec2::ONE {
        for vertex in &mut v {
            vertex.position = (vertex.pos() * scale).into();
        }
    }
    v
}

fn r(x0: f32, y0: f32, x1: f32, y1: f32, color: Color) -> [Vertex; 6] {
    rect(Vec2::new(x0, y0), Vec2::new(x1, y1), color)
}

/// 90x70: body, accent stripe, arms, two rotors, camera, legs
fn drone(sprite: &Sprite) -> Vec<Vertex> {
    let body = sprite.color(0);
    let accent = sprite.color(1);
    let frame = sprite.color(2);
    let rotor = sprite.color(3);

    let mut v = Vec::with_capacity(128);
    v.extend(r(5.0, 26.0, 85.0, 31.0, frame));
    v.extend(r(10.0, 18.0, 14.0, 28.0, frame));
    v.extend(r(76.0, 18.0, 80.0, 28.0, frame));
    v.extend(ellipse(Vec2::new(12.0, 18.0), Vec2::new(12.0, 3.5), rotor, 12));
    v.extend(ellipse(Vec2::new(78.0, 18.0), Vec2::new(12.0, 3.5), rotor, 12));
    v.extend(r(25.0, 30.0, 65.0, 55.0, body));
    v.extend(r(25.0, 38.0, 65.0, 44.0, accent));
    v.extend(circle(Vec2::new(45.0, 58.0), 6.0, body, 10));
    v.extend(r(30.0, 55.0, 33.0, 68.0, frame));
    v.extend(r(57.0, 55.0, 60.0, 68.0, frame));
    v
}

/// 100x500: shaft with highlight and shade, lip at the bottom end
fn pipe(sprite: &Sprite) -> Vec<Vertex> {
    let body = sprite.color(0);
    let shade = sprite.color(1);
    let highlight = sprite.color(2);

    let mut v = Vec::with_capacity(36);
    v.extend(r(6.0, 0.0, 94.0, 470.0, body));
    v.extend(r(14.0, 0.0, 24.0, 470.0, highlight));
    v.extend(r(70.0, 0.0, 90.0, 470.0, shade));
    v.extend(r(0.0, 470.0, 100.0, 500.0, body));
    v.extend(r(6.0, 473.0, 16.0, 497.0, highlight));
    v.extend(r(0.0, 494.0, 100.0, 500.0, shade));
    v
}

/// 400x100: dirt with a grass strip and pebble dashes
fn floor(sprite: &Sprite) -> Vec<Vertex> {
    let dirt = sprite.color(0);
    let grass = sprite.color(1);
    let pebbles = sprite.color(2);

    let mut v = Vec::with_capacity(12 + 6 * 20);
    v.extend(r(0.0, 0.0, 400.0, 100.0, dirt));
    v.extend(r(0.0, 0.0, 400.0, 18.0, grass));
    for i in 0..10 {
        let x = i as f32 * 40.0;
        v.extend(r(x + 10.0, 40.0, x + 30.0, 46.0, pebbles));
        v.extend(r(x + 25.0, 70.0, x + 40.0, 75.0, pebbles));
    }
    v
}

/// 180x90: three puffs on a flat base
fn cloud(sprite: &Sprite) -> Vec<Vertex> {
    let white = sprite.color(0);
    let shade = sprite.color(1);

    let mut v = Vec::with_capacity(128);
    v.extend(r(40.0, 55.0, 140.0, 85.0, shade));
    v.extend(circle(Vec2::new(50.0, 55.0), 30.0, white, 16));
    v.extend(circle(Vec2::new(90.0, 42.0), 38.0, white, 20));
    v.extend(circle(Vec2::new(135.0, 55.0), 30.0, white, 16));
    v.extend(r(45.0, 55.0, 135.0, 78.0, white));
    v
}

/// 700x350: framed panel on two posts
fn billboard(sprite: &Sprite) -> Vec<Vertex> {
    let wood = sprite.color(0);
    let panel = sprite.color(1);
    let accent = sprite.color(2);
    let ink = sprite.color(3);

    let mut v = Vec::with_capacity(48);
    v.extend(r(120.0, 200.0, 150.0, 350.0, wood));
    v.extend(r(550.0, 200.0, 580.0, 350.0, wood));
    v.extend(r(40.0, 20.0, 660.0, 220.0, wood));
    v.extend(r(55.0, 35.0, 645.0, 205.0, panel));
    v.extend(r(55.0, 35.0, 645.0, 70.0, accent));
    v.extend(r(90.0, 100.0, 610.0, 120.0, ink));
    v.extend(r(90.0, 140.0, 480.0, 160.0, ink));
    v
}

/// How a sprite mesh is placed on screen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Screen position of the sprite's top-left corner
    pub pos: Vec2,
    /// Mirror top-to-bottom
    pub flip_vertical: bool,
    /// Counter-clockwise rotation about the sprite center, in degrees
    pub angle_deg: f32,
}

/// Transform a local-space sprite mesh onto the screen
pub fn place(mesh: &[Vertex], size: Vec2, placement: Placement) -> impl Iterator<Item = Vertex> + '_ {
    let center = size * 0.5;
    // y points down, so counter-clockwise on screen is a negative math angle
    let (sin, cos) = (-placement.angle_deg.to_radians()).sin_cos();

    mesh.iter().map(move |vertex| {
        let mut p = vertex.pos();
        if placement.flip_vertical {
            p.y = size.y - p.y;
        }
        if placement.angle_deg != 0.0 {
            let d = p - center;
            p = center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
        }
        let p = p + placement.pos;
        Vertex::new(p.x, p.y, vertex.color)
    })
}
