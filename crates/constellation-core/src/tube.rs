//! Tube meshes swept along a curve.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::curve::CatmullRomCurve;

/// Triangle mesh data for a tube, in world coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TubeGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Triangle list, counter-clockwise.
    pub indices: Vec<u32>,
}

/// Orientation frames along a curve.
struct Frames {
    normals: Vec<Vec3>,
    binormals: Vec<Vec3>,
}

impl TubeGeometry {
    /// Sweep a circle of `radius` along `curve`.
    ///
    /// Produces `(tubular_segments + 1) * (radial_segments + 1)` vertices and
    /// `tubular_segments * radial_segments * 6` indices.
    pub fn sweep(
        curve: &CatmullRomCurve,
        tubular_segments: u32,
        radius: f32,
        radial_segments: u32,
    ) -> Self {
        let tubular = tubular_segments.max(1);
        let radial = radial_segments.max(1);
        let frames = frenet_frames(curve, tubular);

        let ring = (radial + 1) as usize;
        let vertex_count = (tubular as usize + 1) * ring;
        let mut geometry = Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity((tubular * radial * 6) as usize),
        };

        for i in 0..=tubular {
            let u = i as f32 / tubular as f32;
            let center = curve.point_at(u);
            let n = frames.normals[i as usize];
            let b = frames.binormals[i as usize];

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let normal = (-v.cos() * n + v.sin() * b).normalize_or_zero();
                geometry.normals.push(normal);
                geometry.positions.push(center + radius * normal);
                geometry.uvs.push(Vec2::new(u, j as f32 / radial as f32));
            }
        }

        let ring = radial + 1;
        for j in 1..=tubular {
            for i in 1..=radial {
                let a = ring * (j - 1) + (i - 1);
                let b = ring * j + (i - 1);
                let c = ring * j + i;
                let d = ring * (j - 1) + i;
                geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        geometry
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Parallel-transported frames, starting from the axis least aligned with
/// the first tangent.
fn frenet_frames(curve: &CatmullRomCurve, segments: u32) -> Frames {
    let count = segments as usize + 1;
    let tangents: Vec<Vec3> = (0..count)
        .map(|i| curve.tangent_at(i as f32 / segments as f32))
        .collect();

    let mut normals = Vec::with_capacity(count);
    let mut binormals = Vec::with_capacity(count);

    let t0 = tangents[0];
    let (tx, ty, tz) = (t0.x.abs(), t0.y.abs(), t0.z.abs());
    // Later axes win ties
    let seed = if tz <= tx.min(ty) {
        Vec3::Z
    } else if ty <= tx {
        Vec3::Y
    } else {
        Vec3::X
    };

    let side = t0.cross(seed).normalize_or_zero();
    normals.push(t0.cross(side));
    binormals.push(t0.cross(normals[0]));

    for i in 1..count {
        let mut normal = normals[i - 1];
        let axis = tangents[i - 1].cross(tangents[i]);
        if axis.length() > f32::EPSILON {
            let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
        }
        binormals.push(tangents[i].cross(normal));
        normals.push(normal);
    }

    Frames {
        normals,
        binormals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let curve = CatmullRomCurve::between(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        let tube = TubeGeometry::sweep(&curve, 64, 0.05, 8);

        assert_eq!(tube.vertex_count(), 65 * 9);
        assert_eq!(tube.indices.len(), 64 * 8 * 6);
        assert_eq!(tube.normals.len(), tube.vertex_count());
        assert_eq!(tube.uvs.len(), tube.vertex_count());
        assert!(tube.indices.iter().all(|&i| (i as usize) < tube.vertex_count()));
    }

    #[test]
    fn test_vertices_sit_on_radius() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let end = Vec3::new(5.0, -2.0, 0.0);
        let curve = CatmullRomCurve::between(start, end);
        let tube = TubeGeometry::sweep(&curve, 16, 0.5, 8);

        for (i, position) in tube.positions.iter().enumerate() {
            let ring = i / 9;
            let center = curve.point_at(ring as f32 / 16.0);
            assert!((position.distance(center) - 0.5).abs() < 1e-3);
        }
    }

    #[test]
    fn test_first_ring_surrounds_start() {
        let start = Vec3::new(-3.0, 4.0, 2.0);
        let curve = CatmullRomCurve::between(start, Vec3::new(3.0, 4.0, 2.0));
        let tube = TubeGeometry::sweep(&curve, 8, 0.05, 8);

        let centroid: Vec3 = tube.positions[..8].iter().copied().sum::<Vec3>() / 8.0;
        assert!(centroid.distance(start) < 1e-3);
    }

    #[test]
    fn test_degenerate_tube_collapses_without_nan() {
        let p = Vec3::new(2.0, 2.0, 2.0);
        let curve = CatmullRomCurve::between(p, p);
        let tube = TubeGeometry::sweep(&curve, 4, 0.05, 4);

        assert!(tube.positions.iter().all(|v| v.is_finite()));
        assert!(tube.positions.iter().all(|v| *v == p));
    }

    #[test]
    fn test_frames_are_orthonormal() {
        let curve = CatmullRomCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(6.0, 0.0, 3.0),
        ]);
        let frames = frenet_frames(&curve, 32);

        for i in 0..frames.normals.len() {
            let t = curve.tangent_at(i as f32 / 32.0);
            let (n, b) = (frames.normals[i], frames.binormals[i]);
            assert!(t.dot(n).abs() < 1e-2);
            assert!((n.length() - 1.0).abs() < 1e-2);
            assert!((b.length() - 1.0).abs() < 1e-2);
        }
    }
}
