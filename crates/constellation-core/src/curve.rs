//! Centripetal Catmull-Rom spline through a list of control points.

use glam::Vec3;

const TANGENT_DELTA: f32 = 0.0001;

/// Open centripetal Catmull-Rom curve.
///
/// The end segments use control points mirrored past the first and last
/// points, so a two-point curve is the straight segment between them with
/// uniform speed. `t` runs over `0.0..=1.0` across all segments.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
}

impl CatmullRomCurve {
    /// Build a curve. Fewer than two points yields a curve stuck at the single
    /// point (or the origin when empty).
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Curve through exactly two points.
    pub fn between(start: Vec3, end: Vec3) -> Self {
        Self::new(vec![start, end])
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position at parameter `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let len = points.len();
        match len {
            0 => return Vec3::ZERO,
            1 => return points[0],
            _ => {}
        }

        let p = (len - 1) as f32 * t.clamp(0.0, 1.0);
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;
        if index >= len - 1 {
            index = len - 2;
            weight = 1.0;
        }

        let p1 = points[index];
        let p2 = points[index + 1];
        let p0 = if index > 0 {
            points[index - 1]
        } else {
            points[0] + (points[0] - points[1])
        };
        let p3 = if index + 2 < len {
            points[index + 2]
        } else {
            points[len - 1] + (points[len - 1] - points[len - 2])
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        // Guard against repeated points
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let mut t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let mut t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        t1 *= dt1;
        t2 *= dt1;

        hermite(p1, p2, t1, t2, weight)
    }

    /// Unit tangent at parameter `t`, or zero where the curve does not move.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point_at(t2) - self.point_at(t1)).normalize_or_zero()
    }
}

fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3, w: f32) -> Vec3 {
    let c0 = x0;
    let c1 = t0;
    let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
    let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
    c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_two_point_curve_hits_endpoints() {
        let curve = CatmullRomCurve::between(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.0, 8.0));
        assert!(approx(curve.point_at(0.0), Vec3::new(1.0, 2.0, 3.0)));
        assert!(approx(curve.point_at(1.0), Vec3::new(-4.0, 0.0, 8.0)));
    }

    #[test]
    fn test_two_point_curve_is_linear() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 0.0, 0.0);
        let curve = CatmullRomCurve::between(a, b);

        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx(curve.point_at(t), a.lerp(b, t)));
        }
    }

    #[test]
    fn test_tangent_points_along_segment() {
        let curve = CatmullRomCurve::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert!(approx(curve.tangent_at(0.5), Vec3::Z));
        assert!(approx(curve.tangent_at(0.0), Vec3::Z));
        assert!(approx(curve.tangent_at(1.0), Vec3::Z));
    }

    #[test]
    fn test_degenerate_curve_has_zero_tangent() {
        let p = Vec3::new(3.0, 3.0, 3.0);
        let curve = CatmullRomCurve::between(p, p);

        assert_eq!(curve.point_at(0.5), p);
        assert_eq!(curve.tangent_at(0.5), Vec3::ZERO);
    }

    #[test]
    fn test_multi_point_curve_passes_through_controls() {
        let points = vec![
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(4.0, 0.0, 1.0),
        ];
        let curve = CatmullRomCurve::new(points.clone());

        assert!(approx(curve.point_at(0.0), points[0]));
        assert!(approx(curve.point_at(0.5), points[1]));
        assert!(approx(curve.point_at(1.0), points[2]));
    }
}
