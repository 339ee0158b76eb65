use bevy::math::Vec2;
use bevy::prelude::Resource;
use std::collections::HashMap;

use super::{TUNING, registry::CardId};

/// Axis-aligned rectangle in screen space (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CardRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        CardRect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        CardRect::new(position.x, position.y, size.x, size.y)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
            Vec2::new(self.x, self.y + self.height),
        ]
    }

    /// Closed bounds: points on the edge count as inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Size of the area cards live in, in logical pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1280.0, 720.0)
    }
}

/// Where a card's top-left corner may rest. A card can hang up to
/// `hang_fraction` of its size off any edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Boundary {
    pub fn new(size: Vec2, viewport: Viewport) -> Self {
        let hang = TUNING.hang_fraction;
        Boundary {
            left: -size.x * hang,
            top: -size.y * hang,
            right: viewport.width - size.x * (1.0 - hang),
            bottom: viewport.height - size.y * (1.0 - hang),
        }
    }

    /// Low bound is checked first, so an empty box (card wider than the
    /// viewport allows) never panics.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(position.x, self.left, self.right),
            clamp_axis(position.y, self.top, self.bottom),
        )
    }

    #[cfg(test)]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.left
            && position.x <= self.right
            && position.y >= self.top
            && position.y <= self.bottom
    }
}

fn clamp_axis(value: f32, low: f32, high: f32) -> f32 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Where cards are actually drawn, owned by whatever paints them
pub trait GeometrySource {
    /// Screen rectangle of the card's rendered representation, given where
    /// it rests on the board. `None` while it is not rendered yet.
    fn rendered_rect(&self, id: CardId, resting: Vec2) -> Option<CardRect>;
}

/// Rendered card sizes, plus the cards drawn away from their resting spot
/// (the zoomed focused card).
#[derive(Resource, Debug, Clone, Default)]
pub struct RenderedLayout {
    sizes: HashMap<CardId, Vec2>,
    displaced: HashMap<CardId, CardRect>,
}

impl RenderedLayout {
    pub fn insert(&mut self, id: CardId, size: Vec2) {
        self.sizes.insert(id, size);
    }

    #[cfg(test)]
    pub fn remove(&mut self, id: CardId) -> Option<Vec2> {
        self.displaced.remove(&id);
        self.sizes.remove(&id)
    }

    pub fn size(&self, id: CardId) -> Option<Vec2> {
        self.sizes.get(&id).copied()
    }

    /// Draw `id` at `rect` instead of its resting spot. Ignored for cards
    /// that are not rendered.
    pub fn set_displaced(&mut self, id: CardId, rect: CardRect) {
        if self.sizes.contains_key(&id) {
            self.displaced.insert(id, rect);
        }
    }

    pub fn clear_displaced(&mut self) {
        self.displaced.clear();
    }
}

impl GeometrySource for RenderedLayout {
    fn rendered_rect(&self, id: CardId, resting: Vec2) -> Option<CardRect> {
        if let Some(rect) = self.displaced.get(&id) {
            return Some(*rect);
        }
        let size = self.sizes.get(&id)?;
        Some(CardRect::from_position_size(resting, *size))
    }
}
