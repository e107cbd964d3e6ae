//! Plane geometry for the simulation: vectors, discs, rectangles, rails.
//! Everything is single-precision with a fixed order of operations; the
//! contact tests are the only collision primitives the simulation uses.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    pub fn dot(self, other: Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn unit(self) -> Vector2 {
        let len = self.length();
        if len <= f32::EPSILON {
            ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Unit vector for a heading in radians.
    pub fn from_angle(radians: f32) -> Vector2 {
        Vector2 {
            x: radians.cos(),
            y: radians.sin(),
        }
    }

    /// Heading of this vector in radians.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// `self + other * scale` in one expression, the common integration step.
    pub fn add_scale(self, other: Vector2, scale: f32) -> Vector2 {
        Vector2 {
            x: self.x + other.x * scale,
            y: self.y + other.y * scale,
        }
    }

    /// Mirror this vector about a collision normal.
    pub fn reflect(self, normal: Vector2) -> Vector2 {
        self.add_scale(normal, -2.0 * self.dot(normal))
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f32) -> Vector2 {
        Vector2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Smallest signed angle equivalent to `radians`, in (-PI, PI].
pub fn wrap_angle(radians: f32) -> f32 {
    use std::f32::consts::PI;
    (radians + PI).rem_euclid(2.0 * PI) - PI
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub a: Vector2,
    pub b: Vector2,
}

/// Result of a contact test. `depth <= 0` means no contact; the normal
/// points from the obstacle toward the circle center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contact {
    pub depth: f32,
    pub normal: Vector2,
}

pub const NO_CONTACT: Contact = Contact {
    depth: 0.0,
    normal: ZERO,
};

pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    (b.center - a.center).length_sq() < reach * reach
}

/// Penetration of a circle into a line segment, via the closest point on
/// the segment.
pub fn segment_circle_contact(segment: &LineSegment, circle: &Circle) -> Contact {
    let span = segment.b - segment.a;
    let span_len_sq = span.length_sq();
    let closest = if span_len_sq <= f32::EPSILON {
        segment.a
    } else {
        let t = ((circle.center - segment.a).dot(span) / span_len_sq).clamp(0.0, 1.0);
        segment.a.add_scale(span, t)
    };

    let offset = circle.center - closest;
    let dist_sq = offset.length_sq();
    if dist_sq >= circle.radius * circle.radius {
        return NO_CONTACT;
    }

    let dist = dist_sq.sqrt();
    if dist <= f32::EPSILON {
        // Center sitting on the segment; push straight up as a canonical
        // escape direction so the result stays deterministic.
        return Contact {
            depth: circle.radius,
            normal: Vector2::new(0.0, 1.0),
        };
    }
    Contact {
        depth: circle.radius - dist,
        normal: offset * (1.0 / dist),
    }
}

/// Contact test against a segment with a known interior side. Within the
/// segment's span a circle whose center ended up past the line is still
/// reported, with a depth that restores it to the interior; outside the
/// span this falls back to the plain endpoint test.
pub fn oriented_segment_circle_contact(
    segment: &LineSegment,
    inward: Vector2,
    circle: &Circle,
) -> Contact {
    let span = segment.b - segment.a;
    let span_len_sq = span.length_sq();
    if span_len_sq <= f32::EPSILON {
        return segment_circle_contact(segment, circle);
    }

    let t = (circle.center - segment.a).dot(span) / span_len_sq;
    if !(0.0..=1.0).contains(&t) {
        return segment_circle_contact(segment, circle);
    }

    let closest = segment.a.add_scale(span, t);
    let offset = circle.center - closest;
    let side = offset.dot(inward);
    if side < 0.0 {
        // Crossed the rail inside its span; depth covers the overshoot.
        return Contact {
            depth: circle.radius - side,
            normal: inward,
        };
    }
    let dist = offset.length();
    if dist >= circle.radius {
        return NO_CONTACT;
    }
    if dist <= f32::EPSILON {
        return Contact {
            depth: circle.radius,
            normal: inward,
        };
    }
    Contact {
        depth: circle.radius - dist,
        normal: offset * (1.0 / dist),
    }
}

/// Penetration of a circle into an axis-aligned rectangle.
pub fn rect_circle_contact(rect: &Rect, circle: &Circle) -> Contact {
    let cx = circle.center.x.clamp(rect.x, rect.x + rect.w);
    let cy = circle.center.y.clamp(rect.y, rect.y + rect.h);
    let offset = circle.center - Vector2::new(cx, cy);
    let dist_sq = offset.length_sq();

    if dist_sq > f32::EPSILON {
        // Center outside the rect.
        if dist_sq >= circle.radius * circle.radius {
            return NO_CONTACT;
        }
        let dist = dist_sq.sqrt();
        return Contact {
            depth: circle.radius - dist,
            normal: offset * (1.0 / dist),
        };
    }

    // Center inside the rect: escape through the nearest face.
    let left = circle.center.x - rect.x;
    let right = rect.x + rect.w - circle.center.x;
    let bottom = circle.center.y - rect.y;
    let top = rect.y + rect.h - circle.center.y;

    let mut depth = left;
    let mut normal = Vector2::new(-1.0, 0.0);
    if right < depth {
        depth = right;
        normal = Vector2::new(1.0, 0.0);
    }
    if bottom < depth {
        depth = bottom;
        normal = Vector2::new(0.0, -1.0);
    }
    if top < depth {
        depth = top;
        normal = Vector2::new(0.0, 1.0);
    }
    Contact {
        depth: depth + circle.radius,
        normal,
    }
}
