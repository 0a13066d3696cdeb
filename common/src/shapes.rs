use crate::vector::Vec2;
use rand::Rng;
use std::fmt::Debug;

pub trait Shape: Debug {
    fn bounding_box(&self) -> Rectangle;
    fn contains_point(&self, x: f32, y: f32) -> bool;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub bounding_box: Rectangle,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        let bounding_box = Rectangle {
            x,
            y,
            width: radius * 2.0,
            height: radius * 2.0,
        };
        Self {
            x,
            y,
            radius,
            bounding_box,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            radius: 0.0,
            bounding_box: Rectangle::default(),
        }
    }
}

impl Shape for Circle {
    fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Axis-aligned rectangle stored as center plus full width/height.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center_half_extent(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            x: center.x,
            y: center.y,
            width: half_extent.x * 2.0,
            height: half_extent.y * 2.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Finite center and non-negative, finite extents.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Squared distance from the point to the nearest edge; zero inside.
    pub fn distance_to_point(&self, x: f32, y: f32) -> f32 {
        let dx = (x - self.x).abs() - self.width / 2.0;
        let dy = (y - self.y).abs() - self.height / 2.0;
        f32::max(dx, 0.0).powi(2) + f32::max(dy, 0.0).powi(2)
    }

    /// Inclusive on every edge.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// Inclusive overlap test; rectangles sharing only an edge intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.top() > self.bottom()
            || other.bottom() < self.top())
    }

    pub fn random_point_inside<R: Rng>(&self, rng: &mut R) -> Vec2 {
        self.random_point_inside_with_margin(0.0, rng)
    }

    /// Samples a point at least `margin` away from every edge. Collapses to
    /// the near edge plus margin when the rectangle is too small.
    pub fn random_point_inside_with_margin<R: Rng>(&self, margin: f32, rng: &mut R) -> Vec2 {
        Vec2::new(
            self.safe_rand_f32(rng, self.left() + margin, self.right() - margin),
            self.safe_rand_f32(rng, self.top() + margin, self.bottom() - margin),
        )
    }

    fn safe_rand_f32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> Rectangle {
        *self
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        Rectangle::contains_point(self, x, y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeEnum {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape for ShapeEnum {
    fn bounding_box(&self) -> Rectangle {
        match self {
            ShapeEnum::Circle(circle) => circle.bounding_box(),
            ShapeEnum::Rectangle(rectangle) => rectangle.bounding_box(),
        }
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        match self {
            ShapeEnum::Circle(circle) => circle.contains_point(x, y),
            ShapeEnum::Rectangle(rectangle) => Rectangle::contains_point(rectangle, x, y),
        }
    }
}
