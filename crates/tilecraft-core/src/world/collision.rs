//! Axis-aligned boxes and swept, axis-separated collision resolution

use glam::Vec2;
use tilecraft_simulation::TILE_SIZE;

use super::tile::TilePos;

/// Axis-aligned box in world units (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

/// Movement axis for per-axis resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Box covered by the tile at `pos`
    pub fn from_tile(pos: TilePos) -> Self {
        let t = TILE_SIZE as f32;
        Self::new(pos.x() as f32 * t, pos.y() as f32 * t, t, t)
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Grow the box by `amount` on every side
    pub fn inflated(&self, amount: f32) -> Aabb {
        Aabb {
            min: self.min - Vec2::splat(amount),
            size: self.size + Vec2::splat(amount * 2.0),
        }
    }

    /// Region covered while moving by `delta` along `axis`
    pub fn swept(&self, axis: Axis, delta: f32) -> Aabb {
        let mut region = *self;
        match axis {
            Axis::Horizontal => {
                region.min.x += delta.min(0.0);
                region.size.x += delta.abs();
            }
            Axis::Vertical => {
                region.min.y += delta.min(0.0);
                region.size.y += delta.abs();
            }
        }
        region
    }

    fn span(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.left(), self.right()),
            Axis::Vertical => (self.top(), self.bottom()),
        }
    }

    fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.size.x,
            Axis::Vertical => self.size.y,
        }
    }

    fn with_start(mut self, axis: Axis, start: f32) -> Aabb {
        match axis {
            Axis::Horizontal => self.min.x = start,
            Axis::Vertical => self.min.y = start,
        }
        self
    }
}

/// Outcome of moving a box along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub resolved: Aabb,
    /// An obstacle stopped the motion short of `delta`
    pub blocked: bool,
}

/// Move `body` by `delta` along `axis`, stopping at the first obstacle reached.
///
/// An obstacle is reached when it overlaps the body on the other axis, extends
/// past the body's leading edge, and starts before the leading edge's target
/// position. The leading edge is clamped to the nearest such obstacle's near
/// face, so obstacles crossed mid-step stop the body just like obstacles
/// overlapping the final box.
pub fn sweep_axis(body: Aabb, axis: Axis, delta: f32, obstacles: &[Aabb]) -> Sweep {
    if delta == 0.0 {
        return Sweep {
            resolved: body,
            blocked: false,
        };
    }

    let (lo, hi) = body.span(axis);
    let (cross_lo, cross_hi) = body.span(axis.other());
    // Far edge of the unobstructed target, computed the way the moved box reports it
    let target_hi = (lo + delta) + body.extent(axis);
    let mut stop: Option<f32> = None;

    for obstacle in obstacles {
        let (o_cross_lo, o_cross_hi) = obstacle.span(axis.other());
        if o_cross_lo >= cross_hi || o_cross_hi <= cross_lo {
            continue;
        }

        let (o_lo, o_hi) = obstacle.span(axis);
        if delta > 0.0 {
            if o_hi > hi && o_lo < target_hi {
                stop = Some(stop.map_or(o_lo, |edge| edge.min(o_lo)));
            }
        } else if o_lo < lo && o_hi > lo + delta {
            stop = Some(stop.map_or(o_hi, |edge| edge.max(o_hi)));
        }
    }

    let start = match stop {
        Some(edge) if delta > 0.0 => edge - body.extent(axis),
        Some(edge) => edge,
        None => lo + delta,
    };

    Sweep {
        resolved: body.with_start(axis, start),
        blocked: stop.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(gx: i32, gy: i32) -> Aabb {
        Aabb::from_tile(TilePos::new(gx, gy))
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::new(0.0, 0.0, 32.0, 32.0);
        let touching = Aabb::new(32.0, 0.0, 32.0, 32.0);
        let inside = Aabb::new(31.0, 31.0, 32.0, 32.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_contains_point_half_open() {
        let a = tile(1, 1);
        assert!(a.contains_point(Vec2::new(32.0, 32.0)));
        assert!(a.contains_point(Vec2::new(63.9, 63.9)));
        assert!(!a.contains_point(Vec2::new(64.0, 40.0)));
        assert!(!a.contains_point(Vec2::new(40.0, 64.0)));
    }

    #[test]
    fn test_swept_region_covers_both_positions() {
        let body = Aabb::new(10.0, 10.0, 32.0, 48.0);
        let right = body.swept(Axis::Horizontal, 5.0);
        assert_eq!(right.left(), 10.0);
        assert_eq!(right.right(), 47.0);

        let up = body.swept(Axis::Vertical, -8.0);
        assert_eq!(up.top(), 2.0);
        assert_eq!(up.bottom(), 58.0);
    }

    #[test]
    fn test_sweep_right_stops_at_wall() {
        let body = Aabb::new(0.0, 0.0, 32.0, 48.0);
        let wall = tile(1, 0);
        let sweep = sweep_axis(body, Axis::Horizontal, 5.0, &[wall]);
        assert!(sweep.blocked, "pushing into a wall already touched");
        assert_eq!(sweep.resolved.left(), 0.0);

        let body = Aabb::new(-3.0, 0.0, 32.0, 48.0);
        let sweep = sweep_axis(body, Axis::Horizontal, 5.0, &[wall]);
        assert!(sweep.blocked);
        assert_eq!(sweep.resolved.right(), 32.0);
    }

    #[test]
    fn test_sweep_left_stops_at_wall() {
        let body = Aabb::new(66.0, 0.0, 32.0, 48.0);
        let wall = tile(1, 1);
        let sweep = sweep_axis(body, Axis::Horizontal, -5.0, &[wall]);
        assert!(sweep.blocked);
        assert_eq!(sweep.resolved.left(), 64.0);
    }

    #[test]
    fn test_sweep_ignores_obstacles_off_axis() {
        let body = Aabb::new(0.0, 0.0, 32.0, 48.0);
        // Directly below the body: only touches the bottom edge
        let floor = tile(1, 2);
        let sweep = sweep_axis(body, Axis::Horizontal, 40.0, &[floor]);
        assert!(!sweep.blocked);
        assert_eq!(sweep.resolved.left(), 40.0);
    }

    #[test]
    fn test_sweep_uses_nearest_obstacle() {
        let body = Aabb::new(0.0, 0.0, 32.0, 48.0);
        let near = tile(0, 3);
        let far = tile(0, 4);
        let sweep = sweep_axis(body, Axis::Vertical, 200.0, &[far, near]);
        assert!(sweep.blocked);
        assert_eq!(sweep.resolved.bottom(), 96.0);
    }

    #[test]
    fn test_sweep_does_not_tunnel_through_thin_floor() {
        let body = Aabb::new(0.0, 0.0, 32.0, 48.0);
        let floor = tile(0, 5);
        // Final box (y=300) would sit entirely below the floor tile
        let sweep = sweep_axis(body, Axis::Vertical, 300.0, &[floor]);
        assert!(sweep.blocked);
        assert_eq!(sweep.resolved.bottom(), 160.0);
    }

    #[test]
    fn test_sweep_zero_delta_is_identity() {
        let body = Aabb::new(1.0, 2.0, 32.0, 48.0);
        let sweep = sweep_axis(body, Axis::Vertical, 0.0, &[body]);
        assert_eq!(sweep.resolved, body);
        assert!(!sweep.blocked);
    }
}
