use super::Point3;

/// Closest point on a segment to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSegmentDistance {
    /// Squared distance from the query point to `point`.
    pub dist_sq: f64,
    /// The closest point on the segment.
    pub point: Point3,
    /// Segment parameter of `point`, in `[0, 1]`.
    pub t: f64,
}

/// Closest pair of points between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSegmentDistance {
    /// Squared distance between `on_first` and `on_second`.
    pub dist_sq: f64,
    /// Closest point on the first segment.
    pub on_first: Point3,
    /// Closest point on the second segment.
    pub on_second: Point3,
    /// Parameter of `on_first` along the first segment, in `[0, 1]`.
    pub s: f64,
    /// Parameter of `on_second` along the second segment, in `[0, 1]`.
    pub t: f64,
}

/// Returns the squared distance from `point` to the segment `start → end`
/// along with the closest point on the segment.
///
/// A zero-length segment yields `start`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn dist_sq_point_segment(point: &Point3, start: &Point3, end: &Point3) -> PointSegmentDistance {
    let dir = end - start;

    // Past the far end.
    let t = dir.dot(&(point - end));
    if t >= 0.0 {
        return PointSegmentDistance {
            dist_sq: (point - end).norm_squared(),
            point: *end,
            t: 1.0,
        };
    }

    // Before the near end.
    let t = dir.dot(&(point - start));
    if t <= 0.0 {
        return PointSegmentDistance {
            dist_sq: (point - start).norm_squared(),
            point: *start,
            t: 0.0,
        };
    }

    let len_sq = dir.norm_squared();
    if len_sq == 0.0 {
        return PointSegmentDistance {
            dist_sq: (point - start).norm_squared(),
            point: *start,
            t: 0.0,
        };
    }

    let t = (t / len_sq).clamp(0.0, 1.0);
    let closest = start + dir * t;
    PointSegmentDistance {
        dist_sq: (point - closest).norm_squared(),
        point: closest,
        t,
    }
}

/// Returns the squared distance between segments `p0 → p1` and `q0 → q1`
/// along with the closest point on each.
///
/// Minimizes `R(s, t) = a·s² − 2b·s·t + c·t² + 2d·s − 2e·t + f` over the
/// unit square, where `s` parameterizes the first segment and `t` the
/// second. The minimum is located by classifying where the line
/// `∂R/∂s = 0` crosses the square and solving a clamped linear root along
/// the relevant edge or crossing segment, so no denominator that can be
/// zero is ever divided by. Parallel, overlapping and zero-length inputs
/// are all valid.
#[must_use]
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub fn dist_sq_segment_segment(
    p0: &Point3,
    p1: &Point3,
    q0: &Point3,
    q1: &Point3,
) -> SegmentSegmentDistance {
    let p_dir = p1 - p0;
    let q_dir = q1 - q0;
    let offset = p0 - q0;

    let a = p_dir.dot(&p_dir);
    let b = p_dir.dot(&q_dir);
    let c = q_dir.dot(&q_dir);
    let d = p_dir.dot(&offset);
    let e = q_dir.dot(&offset);

    let coeffs = Quadratic { b, c, e };

    // ∂R/∂s and ∂R/∂t (halved) at the four corners of the unit square.
    let f00 = d;
    let f10 = f00 + a;
    let f01 = f00 - b;
    let f11 = f10 - b;

    let g00 = -e;
    let g10 = g00 - b;
    let g01 = g00 + c;
    let g11 = g10 + c;

    let (s, t) = if a > 0.0 && c > 0.0 {
        // Roots of ∂R/∂s = 0 on the edges t = 0 and t = 1.
        let s_root = [clamped_root(a, f00, f10), clamped_root(a, f01, f11)];
        let class = [Side::of(s_root[0]), Side::of(s_root[1])];

        match class {
            [Side::Below, Side::Below] => (0.0, clamped_root(c, g00, g01)),
            [Side::Above, Side::Above] => (1.0, clamped_root(c, g10, g11)),
            _ => {
                let crossing = zero_gradient_crossing(s_root, class, b, f00, f10);
                minimize_along_crossing(&crossing, &coeffs, [g00, g10, g01, g11])
            }
        }
    } else if a > 0.0 {
        // Second segment is a point.
        (clamped_root(a, f00, f10), 0.0)
    } else if c > 0.0 {
        // First segment is a point.
        (0.0, clamped_root(c, g00, g01))
    } else {
        (0.0, 0.0)
    };

    let on_first = p0 + p_dir * s;
    let on_second = q0 + q_dir * t;
    SegmentSegmentDistance {
        dist_sq: (on_first - on_second).norm_squared(),
        on_first,
        on_second,
        s,
        t,
    }
}

/// Root of the linear function `h(z) = h0 + slope·z` restricted to `[0, 1]`.
///
/// `slope` is positive and `h1 = h0 + slope`. When `h0` and `h1` straddle
/// zero the true root is interior; if rounding nonetheless pushes the
/// computed ratio past 1 (both values near zero), the midpoint is used.
#[must_use]
pub fn clamped_root(slope: f64, h0: f64, h1: f64) -> f64 {
    if h0 >= 0.0 {
        return 0.0;
    }
    if h1 <= 0.0 {
        return 1.0;
    }
    let root = -h0 / slope;
    if root > 1.0 {
        0.5
    } else {
        root
    }
}

/// Position of an `s` root relative to the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Below,
    Inside,
    Above,
}

impl Side {
    fn of(value: f64) -> Self {
        if value <= 0.0 {
            Side::Below
        } else if value >= 1.0 {
            Side::Above
        } else {
            Side::Inside
        }
    }
}

/// Boundary edge of the unit square touched by the zero-gradient line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// `s = 0`
    S0,
    /// `s = 1`
    S1,
    /// `t = 0`
    T0,
    /// `t = 1`
    T1,
}

/// The part of the line `∂R/∂s = 0` that lies inside the unit square.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    edge: [Edge; 2],
    end: [(f64, f64); 2],
}

/// The coefficients of `R` needed to differentiate along the crossing.
#[derive(Debug, Clone, Copy)]
struct Quadratic {
    b: f64,
    c: f64,
    e: f64,
}

impl Quadratic {
    /// Half of `∂R/∂t` at `(s, t)`.
    fn dt(&self, (s, t): (f64, f64)) -> f64 {
        -self.b * s + self.c * t - self.e
    }
}

/// `t` on edge `s = 0` (or `s = 1`) where `∂R/∂s = 0`, i.e. `f / b`.
///
/// Falls back to the midpoint when the ratio leaves `[0, 1]` through
/// rounding, or when `b` vanishes.
#[allow(clippy::float_cmp)]
fn edge_ratio(f: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.5;
    }
    let t = f / b;
    if (0.0..=1.0).contains(&t) {
        t
    } else {
        0.5
    }
}

/// Finds the two boundary points where `∂R/∂s = 0` enters and leaves the
/// unit square, given the classified `s` roots on `t = 0` and `t = 1`.
///
/// Only called when the roots are not both on the same side, which
/// implies `b != 0`.
fn zero_gradient_crossing(
    s_root: [f64; 2],
    class: [Side; 2],
    b: f64,
    f00: f64,
    f10: f64,
) -> Crossing {
    let on_s0 = (Edge::S0, (0.0, edge_ratio(f00, b)));
    let on_s1 = (Edge::S1, (1.0, edge_ratio(f10, b)));
    let on_t0 = (Edge::T0, (s_root[0], 0.0));
    let on_t1 = (Edge::T1, (s_root[1], 1.0));

    let (first, second) = match class {
        [Side::Below, Side::Inside] => (on_s0, on_t1),
        [Side::Below, _] => (on_s0, on_s1),
        [Side::Inside, Side::Below] => (on_t0, on_s0),
        [Side::Inside, Side::Inside] => (on_t0, on_t1),
        [Side::Inside, Side::Above] => (on_t0, on_s1),
        [Side::Above, Side::Inside] => (on_s1, on_t1),
        [Side::Above, _] => (on_s1, on_s0),
    };

    Crossing {
        edge: [first.0, second.0],
        end: [first.1, second.1],
    }
}

/// Minimizes `R` along the crossing segment by examining the sign of the
/// directional derivative at each end.
fn minimize_along_crossing(
    crossing: &Crossing,
    coeffs: &Quadratic,
    [g00, g10, g01, g11]: [f64; 4],
) -> (f64, f64) {
    let on_edge = |edge: Edge, end: (f64, f64)| match edge {
        Edge::S0 => (0.0, clamped_root(coeffs.c, g00, g01)),
        Edge::S1 => (1.0, clamped_root(coeffs.c, g10, g11)),
        Edge::T0 | Edge::T1 => end,
    };

    let [end0, end1] = crossing.end;
    let delta = end1.1 - end0.1;

    let h0 = delta * coeffs.dt(end0);
    if h0 >= 0.0 {
        return on_edge(crossing.edge[0], end0);
    }

    let h1 = delta * coeffs.dt(end1);
    if h1 <= 0.0 {
        return on_edge(crossing.edge[1], end1);
    }

    // h0 < 0 < h1, so the denominator is strictly negative.
    let z = (h0 / (h0 - h1)).clamp(0.0, 1.0);
    let omz = 1.0 - z;
    (omz * end0.0 + z * end1.0, omz * end0.1 + z * end1.1)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    // ── dist_sq_point_segment ──

    #[test]
    fn point_projects_to_interior() {
        let r = dist_sq_point_segment(&p(1.0, 1.0, 0.0), &p(0.0, 0.0, 0.0), &p(2.0, 0.0, 0.0));
        assert_relative_eq!(r.dist_sq, 1.0, epsilon = TOL);
        assert_relative_eq!(r.point, p(1.0, 0.0, 0.0), epsilon = TOL);
        assert_relative_eq!(r.t, 0.5, epsilon = TOL);
    }

    #[test]
    fn point_before_start_clamps() {
        let r = dist_sq_point_segment(&p(-3.0, 4.0, 0.0), &p(0.0, 0.0, 0.0), &p(2.0, 0.0, 0.0));
        assert_relative_eq!(r.dist_sq, 25.0, epsilon = TOL);
        assert_eq!(r.point, p(0.0, 0.0, 0.0));
        assert_eq!(r.t, 0.0);
    }

    #[test]
    fn point_past_end_clamps() {
        let r = dist_sq_point_segment(&p(5.0, 0.0, 4.0), &p(0.0, 0.0, 0.0), &p(2.0, 0.0, 0.0));
        assert_relative_eq!(r.dist_sq, 25.0, epsilon = TOL);
        assert_eq!(r.point, p(2.0, 0.0, 0.0));
        assert_eq!(r.t, 1.0);
    }

    #[test]
    fn point_on_segment_has_zero_distance() {
        let start = p(1.0, 2.0, 3.0);
        let end = p(4.0, 6.0, 3.0);
        for &t in &[0.0, 0.25, 0.5, 0.9, 1.0] {
            let q = start + (end - start) * t;
            let r = dist_sq_point_segment(&q, &start, &end);
            assert_abs_diff_eq!(r.dist_sq, 0.0, epsilon = TOL);
            assert_relative_eq!(r.point, q, epsilon = 1e-9);
        }
    }

    #[test]
    fn point_to_degenerate_segment() {
        let a = p(1.0, 1.0, 1.0);
        let r = dist_sq_point_segment(&p(1.0, 4.0, 5.0), &a, &a);
        assert_relative_eq!(r.dist_sq, 25.0, epsilon = TOL);
        assert_eq!(r.point, a);
    }

    #[test]
    fn closest_point_never_extrapolates() {
        let start = p(-1.0, 0.5, 2.0);
        let end = p(3.0, -2.0, 1.0);
        let queries = [
            p(10.0, 10.0, 10.0),
            p(-10.0, 3.0, 0.0),
            p(0.0, 0.0, 0.0),
            p(1.0, -0.75, 1.5),
            p(100.0, -80.0, 0.0),
        ];
        for q in &queries {
            let r = dist_sq_point_segment(q, &start, &end);
            assert!((0.0..=1.0).contains(&r.t), "t={}", r.t);
            let expected = start + (end - start) * r.t;
            assert_relative_eq!(r.point, expected, epsilon = 1e-9);
        }
    }

    // ── clamped_root ──

    #[test]
    fn clamped_root_regions() {
        assert_eq!(clamped_root(2.0, 1.0, 3.0), 0.0);
        assert_eq!(clamped_root(2.0, -3.0, -1.0), 1.0);
        assert_relative_eq!(clamped_root(4.0, -1.0, 3.0), 0.25);
    }

    #[test]
    fn clamped_root_rounding_fallback() {
        // h0 < 0 < h1 but the ratio overshoots: tiny values, inconsistent slope.
        assert_eq!(clamped_root(1e-300, -1e-290, 1e-300), 0.5);
    }

    // ── dist_sq_segment_segment ──

    #[test]
    fn crossing_segments_meet() {
        let r = dist_sq_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(2.0, 2.0, 0.0),
            &p(0.0, 2.0, 0.0),
            &p(2.0, 0.0, 0.0),
        );
        assert_abs_diff_eq!(r.dist_sq, 0.0, epsilon = TOL);
        assert_relative_eq!(r.on_first, p(1.0, 1.0, 0.0), epsilon = TOL);
        assert_relative_eq!(r.on_second, p(1.0, 1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn skew_segments() {
        // X-axis segment and a Y-direction segment lifted by z = 3.
        let r = dist_sq_segment_segment(
            &p(-1.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.5, -1.0, 3.0),
            &p(0.5, 1.0, 3.0),
        );
        assert_relative_eq!(r.dist_sq, 9.0, epsilon = TOL);
        assert_relative_eq!(r.on_first, p(0.5, 0.0, 0.0), epsilon = TOL);
        assert_relative_eq!(r.on_second, p(0.5, 0.0, 3.0), epsilon = TOL);
    }

    #[test]
    fn parallel_offset_is_exact() {
        for &d in &[0.5, 1.0, 3.0, 7.25] {
            let r = dist_sq_segment_segment(
                &p(0.0, 0.0, 0.0),
                &p(2.0, 0.0, 0.0),
                &p(0.0, d, 0.0),
                &p(2.0, d, 0.0),
            );
            assert_eq!(r.dist_sq, d * d);
        }
    }

    #[test]
    fn antiparallel_partial_overlap() {
        let r = dist_sq_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(4.0, 0.0, 0.0),
            &p(6.0, 0.0, 2.0),
            &p(2.0, 0.0, 2.0),
        );
        assert_relative_eq!(r.dist_sq, 4.0, epsilon = TOL);
        assert!(r.on_first.x >= 2.0 - TOL && r.on_first.x <= 4.0 + TOL);
        assert_relative_eq!(r.on_first.x, r.on_second.x, epsilon = TOL);
    }

    #[test]
    fn collinear_disjoint_segments() {
        let r = dist_sq_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(3.0, 0.0, 0.0),
            &p(5.0, 0.0, 0.0),
        );
        assert_relative_eq!(r.dist_sq, 4.0, epsilon = TOL);
        assert_eq!(r.on_first, p(1.0, 0.0, 0.0));
        assert_eq!(r.on_second, p(3.0, 0.0, 0.0));
    }

    #[test]
    fn endpoint_to_interior() {
        // Second segment's end is the closest feature, touching the first's interior region.
        let r = dist_sq_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(10.0, 0.0, 0.0),
            &p(5.0, 5.0, 0.0),
            &p(5.0, 1.0, 0.0),
        );
        assert_relative_eq!(r.dist_sq, 1.0, epsilon = TOL);
        assert_relative_eq!(r.on_first, p(5.0, 0.0, 0.0), epsilon = TOL);
        assert_relative_eq!(r.on_second, p(5.0, 1.0, 0.0), epsilon = TOL);
        assert_relative_eq!(r.t, 1.0, epsilon = TOL);
    }

    #[test]
    fn swapping_segments_is_symmetric() {
        let cases = [
            (p(0.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0), p(2.0, 0.0, 0.0)),
            (p(-1.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.5, -1.0, 3.0), p(0.5, 1.0, 3.0)),
            (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(3.0, 1.0, 0.0), p(5.0, 2.0, 1.0)),
            (p(1.0, 2.0, 3.0), p(-2.0, 0.5, 1.0), p(0.0, 0.0, 0.0), p(0.3, 4.0, -2.0)),
        ];
        for (a0, a1, b0, b1) in &cases {
            let fwd = dist_sq_segment_segment(a0, a1, b0, b1);
            let rev = dist_sq_segment_segment(b0, b1, a0, a1);
            assert_relative_eq!(fwd.dist_sq, rev.dist_sq, epsilon = 1e-9);
            assert_relative_eq!(fwd.on_first, rev.on_second, epsilon = 1e-9);
            assert_relative_eq!(fwd.on_second, rev.on_first, epsilon = 1e-9);
        }
    }

    #[test]
    fn parallel_swap_keeps_distance() {
        let a0 = p(0.0, 0.0, 0.0);
        let a1 = p(4.0, 0.0, 0.0);
        let b0 = p(1.0, 2.0, 0.0);
        let b1 = p(3.0, 2.0, 0.0);
        let fwd = dist_sq_segment_segment(&a0, &a1, &b0, &b1);
        let rev = dist_sq_segment_segment(&b0, &b1, &a0, &a1);
        assert_relative_eq!(fwd.dist_sq, 4.0, epsilon = TOL);
        assert_relative_eq!(rev.dist_sq, 4.0, epsilon = TOL);
    }

    #[test]
    fn degenerate_first_reduces_to_point_segment() {
        let pt = p(1.0, 3.0, -1.0);
        let q0 = p(-2.0, 0.0, 0.0);
        let q1 = p(4.0, 1.0, 0.0);
        let seg = dist_sq_segment_segment(&pt, &pt, &q0, &q1);
        let reference = dist_sq_point_segment(&pt, &q0, &q1);
        assert_relative_eq!(seg.dist_sq, reference.dist_sq, epsilon = 1e-9);
        assert_relative_eq!(seg.on_second, reference.point, epsilon = 1e-9);
        assert_eq!(seg.on_first, pt);
    }

    #[test]
    fn degenerate_second_reduces_to_point_segment() {
        let pt = p(7.0, 1.0, 0.0);
        let seg = dist_sq_segment_segment(&p(0.0, 0.0, 0.0), &p(4.0, 0.0, 0.0), &pt, &pt);
        assert_relative_eq!(seg.dist_sq, 10.0, epsilon = TOL);
        assert_eq!(seg.on_first, p(4.0, 0.0, 0.0));
        assert_eq!(seg.on_second, pt);
    }

    #[test]
    fn both_degenerate() {
        let a = p(1.0, 1.0, 1.0);
        let b = p(1.0, 3.0, 1.0);
        let r = dist_sq_segment_segment(&a, &a, &b, &b);
        assert_relative_eq!(r.dist_sq, 4.0, epsilon = TOL);
        assert_eq!((r.s, r.t), (0.0, 0.0));
    }

    #[test]
    fn coincident_points_are_finite() {
        let a = p(0.0, 0.0, 0.0);
        let r = dist_sq_segment_segment(&a, &a, &a, &a);
        assert_eq!(r.dist_sq, 0.0);
        assert!(r.on_first.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn nearly_parallel_stays_in_range() {
        let r = dist_sq_segment_segment(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
            &p(1.0, 1.0 + 1e-15, 0.0),
        );
        assert!((0.0..=1.0).contains(&r.s), "s={}", r.s);
        assert!((0.0..=1.0).contains(&r.t), "t={}", r.t);
        assert_relative_eq!(r.dist_sq, 1.0, epsilon = 1e-9);
    }
}
