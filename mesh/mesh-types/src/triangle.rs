//! Triangle with concrete vertex positions.

use nalgebra::{Point3, Vector3};

/// A triangle with concrete vertex positions.
///
/// Utility type for geometric queries; stores positions rather than
/// indices. The label-transfer pipeline uses it for centroids and for
/// exact point-to-surface distance.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(0.0, 3.0, 0.0),
/// );
///
/// let c = tri.centroid();
/// assert!((c.x - 1.0).abs() < 1e-12);
/// assert!((tri.area() - 4.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Centroid (average of the three vertex positions).
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }

    /// Unnormalized normal (edge cross product).
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Triangle area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Whether the triangle has (near-)zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }

    /// Closest point on the triangle to a query point.
    ///
    /// Walks the barycentric regions of the triangle (vertex, edge,
    /// interior) and returns the exact closest point. Zero-area triangles
    /// are answered as the closest point on their edges, so degenerate
    /// faces participate in nearest-surface queries as segments or points.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn closest_point(&self, p: &Point3<f64>) -> Point3<f64> {
        // The interior case below divides by the doubled area.
        if self.normal_unnormalized().norm_squared() == 0.0 {
            return self.closest_point_on_edges(p);
        }

        let (a, b, c) = (self.v0, self.v1, self.v2);
        let ab = b - a;
        let ac = c - a;
        let ap = p - a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1.mul_add(d4, -(d3 * d2));
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return Point3::from(a.coords + ab * v);
        }

        let cp = p - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5.mul_add(d2, -(d1 * d6));
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return Point3::from(a.coords + ac * w);
        }

        let va = d3.mul_add(d6, -(d5 * d4));
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return Point3::from(b.coords + (c - b) * w);
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        Point3::from(a.coords + ab * v + ac * w)
    }

    /// Squared distance from a query point to the triangle surface.
    #[inline]
    #[must_use]
    pub fn distance_squared_to(&self, p: &Point3<f64>) -> f64 {
        (self.closest_point(p) - p).norm_squared()
    }

    fn closest_point_on_edges(&self, p: &Point3<f64>) -> Point3<f64> {
        let candidates = [
            closest_point_on_segment(p, &self.v0, &self.v1),
            closest_point_on_segment(p, &self.v1, &self.v2),
            closest_point_on_segment(p, &self.v2, &self.v0),
        ];
        let mut best = candidates[0];
        let mut best_sq = (best - p).norm_squared();
        for candidate in &candidates[1..] {
            let sq = (candidate - p).norm_squared();
            if sq < best_sq {
                best_sq = sq;
                best = *candidate;
            }
        }
        best
    }
}

/// Closest point on the segment `[a, b]` to `p`.
fn closest_point_on_segment(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    Point3::from(a.coords + ab * t)
}
