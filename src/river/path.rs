//! River path planning

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// A 2D position, either normalized map space or grid space.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Self {
        let len = (self.x * self.x + self.y * self.y).sqrt();
        if len <= f32::EPSILON {
            return Self::default();
        }
        Self::new(self.x / len, self.y / len)
    }
}

/// Ordered river polyline in grid coordinates, source first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RiverPath {
    points: Vec<Point>,
}

impl RiverPath {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of segment lengths along the path.
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

/// Sideways offset of the path at parameter `t` for a given jitter draw.
fn lateral_offset(t: f32, curve_frequency: f32, draw: f32, width: f32) -> f32 {
    (t * std::f32::consts::PI * curve_frequency).sin() * draw * width * 0.5
}

/// Plan a river from `start` to `end` (grid space).
///
/// Emits `ceil(distance) + 1` points. Each point is the straight-line
/// position at `t = i / steps` pushed along the perpendicular by
/// `sin(t * PI * curve_frequency) * U * width / 2`, with a fresh draw `U`
/// per point. Coincident endpoints produce a single point and no draws.
pub fn plan_path(
    start: Point,
    end: Point,
    rng: &mut RandomSource,
    curve_frequency: f32,
    width: f32,
) -> RiverPath {
    let steps = start.distance(end).ceil() as usize;
    if steps == 0 {
        return RiverPath::new(vec![start]);
    }

    let direction = Point::new(end.x - start.x, end.y - start.y).normalized();
    let perpendicular = Point::new(-direction.y, direction.x);

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let base = start.lerp(end, t);
        let offset = lateral_offset(t, curve_frequency, rng.next_unit() as f32, width);
        points.push(Point::new(
            base.x + perpendicular.x * offset,
            base.y + perpendicular.y * offset,
        ));
    }

    RiverPath::new(points)
}
