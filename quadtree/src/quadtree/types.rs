use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use common::Vec2;
use smallvec::SmallVec;

/// A stored position tagged with the caller's opaque handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadtreePoint {
    pub position: Vec2,
    pub value: u32,
}

impl QuadtreePoint {
    pub fn new(x: f32, y: f32, value: u32) -> Self {
        Self {
            position: Vec2::new(x, y),
            value,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

pub(crate) const NW: usize = 0;
pub(crate) const NE: usize = 1;
pub(crate) const SW: usize = 2;
pub(crate) const SE: usize = 3;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) bounds: Rectangle,
    pub(crate) depth: usize,
    pub(crate) points: Vec<QuadtreePoint>,
    // Arena indices; the root is never a child, so 0 means "no children".
    pub(crate) children: [u32; 4],
}

impl Node {
    pub(crate) fn new_leaf(bounds: Rectangle, depth: usize, capacity: usize) -> Self {
        Self {
            bounds,
            depth,
            points: Vec::with_capacity(capacity),
            children: [0; 4],
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0] == 0
    }
}

pub(crate) type NodeStack = SmallVec<[u32; 64]>;

/// Quadrant rectangles in NW, NE, SW, SE order. West is -x, north is +y.
pub(crate) fn child_bounds(parent: &Rectangle) -> [Rectangle; 4] {
    let quarter = Vec2::new(parent.half_width() * 0.5, parent.half_height() * 0.5);
    let center = parent.center();
    let mut quadrants = [Rectangle::default(); 4];
    quadrants[NW] = Rectangle::from_center_half_extent(
        Vec2::new(center.x - quarter.x, center.y + quarter.y),
        quarter,
    );
    quadrants[NE] = Rectangle::from_center_half_extent(
        Vec2::new(center.x + quarter.x, center.y + quarter.y),
        quarter,
    );
    quadrants[SW] = Rectangle::from_center_half_extent(
        Vec2::new(center.x - quarter.x, center.y - quarter.y),
        quarter,
    );
    quadrants[SE] = Rectangle::from_center_half_extent(
        Vec2::new(center.x + quarter.x, center.y - quarter.y),
        quarter,
    );
    quadrants
}

pub(crate) fn validate_bounds(bounds: &Rectangle) -> QuadtreeResult<()> {
    if !bounds.is_valid() {
        return Err(QuadtreeError::InvalidBounds {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        });
    }
    Ok(())
}
