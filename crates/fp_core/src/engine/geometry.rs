//! Planar geometry shared by the physics step and the agents.
//!
//! World units are sprite pixels; +y points down the screen.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub type Vec2 = Vector2<f32>;

#[inline]
pub fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Unit vector, or zero for a degenerate input.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.norm();
    if len < 0.0001 {
        Vec2::zeros()
    } else {
        v / len
    }
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).norm()
}

/// Heading of `v` in radians (atan2 convention).
#[inline]
pub fn angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[inline]
pub fn from_angle(angle: f32, length: f32) -> Vec2 {
    vec2(angle.cos() * length, angle.sin() * length)
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            left: center.x - half_width,
            top: center.y - half_height,
            right: center.x + half_width,
            bottom: center.y + half_height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        vec2((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Inclusive on every edge.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// True when no part of `self` overlaps `other`.
    pub fn is_fully_outside(&self, other: &Aabb) -> bool {
        !self.intersects(other)
    }

    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        vec2(p.x.clamp(self.left, self.right), p.y.clamp(self.top, self.bottom))
    }
}

/// Contact between a circle and a box. `normal` points from the box toward
/// the circle center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub depth: f32,
}

pub fn circle_box_contact(center: Vec2, radius: f32, aabb: &Aabb) -> Option<Contact> {
    let closest = aabb.clamp_point(center);
    let delta = center - closest;
    let dist_sq = delta.norm_squared();
    if dist_sq > radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > 0.0001 {
        return Some(Contact { normal: delta / dist, depth: radius - dist });
    }

    // Center inside the box: push out along the shallowest side.
    let to_left = center.x - aabb.left;
    let to_right = aabb.right - center.x;
    let to_top = center.y - aabb.top;
    let to_bottom = aabb.bottom - center.y;
    let min = to_left.min(to_right).min(to_top).min(to_bottom);
    let normal = if min == to_left {
        vec2(-1.0, 0.0)
    } else if min == to_right {
        vec2(1.0, 0.0)
    } else if min == to_top {
        vec2(0.0, -1.0)
    } else {
        vec2(0.0, 1.0)
    };
    Some(Contact { normal, depth: radius + min })
}
