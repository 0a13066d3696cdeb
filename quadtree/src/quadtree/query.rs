use super::types::{NodeStack, QuadtreePoint};
use super::QuadTree;
use common::shapes::{Circle, Rectangle, ShapeEnum};
use common::Vec2;

impl QuadTree {
    /// Every point inside `range`, edges included.
    pub fn query_range(&self, range: &Rectangle) -> Vec<QuadtreePoint> {
        let mut found = Vec::new();
        self.query_range_with(range, |point| found.push(point));
        found
    }

    pub fn query_range_with<F>(&self, range: &Rectangle, mut f: F)
    where
        F: FnMut(QuadtreePoint),
    {
        let mut stack = NodeStack::new();
        stack.push(0);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            if !node.bounds.intersects(range) {
                continue;
            }
            for point in &node.points {
                if range.contains_point(point.x(), point.y()) {
                    f(*point);
                }
            }
            if !node.is_leaf() {
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Points within `radius` of `center`. Searches the circle's bounding
    /// square, then keeps points with squared distance at most `radius^2`.
    /// A negative or NaN radius matches nothing.
    pub fn query_radius(&self, center: Vec2, radius: f32) -> Vec<QuadtreePoint> {
        let mut found = Vec::new();
        self.query_radius_with(center, radius, |point| found.push(point));
        found
    }

    pub fn query_radius_with<F>(&self, center: Vec2, radius: f32, mut f: F)
    where
        F: FnMut(QuadtreePoint),
    {
        if !(radius >= 0.0) {
            return;
        }
        let square = Rectangle::from_center_half_extent(center, Vec2::new(radius, radius));
        let radius_sq = radius * radius;
        self.query_range_with(&square, |point| {
            if point.position.distance_sq(center) <= radius_sq {
                f(point);
            }
        });
    }

    pub fn query_circle(&self, circle: &Circle) -> Vec<QuadtreePoint> {
        self.query_radius(circle.center(), circle.radius())
    }

    pub fn query_shape(&self, shape: &ShapeEnum) -> Vec<QuadtreePoint> {
        match shape {
            ShapeEnum::Circle(circle) => self.query_circle(circle),
            ShapeEnum::Rectangle(rectangle) => self.query_range(rectangle),
        }
    }
}
