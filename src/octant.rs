//! Octant grid: the triangle spanned by the three unit axes, subdivided into a
//! regular grid of `4^levels` sub-triangles and pushed out onto the unit sphere.

use crate::vertex::Vertex;
use glam::Vec3;

/// Subdivision depth used by the viewer.
pub const DEFAULT_LEVELS: u32 = 3;

/// Deepest grid whose vertex indices still fit in a `u32`.
pub const MAX_LEVELS: u32 = 16;

/// Number of vertices in a grid of the given depth: `(N+1)(N+2)/2`.
pub fn vertex_count(levels: u32) -> usize {
    let n = segments(levels) as usize;
    (n + 1) * (n + 2) / 2
}

/// Number of indices in a grid of the given depth: three per triangle, `N^2` triangles.
pub fn index_count(levels: u32) -> usize {
    let n = segments(levels) as usize;
    3 * n * n
}

fn segments(levels: u32) -> u32 {
    assert!(
        levels <= MAX_LEVELS,
        "octant depth {levels} exceeds the u32 index range (max {MAX_LEVELS})"
    );
    1 << levels
}

#[derive(Debug, Clone, PartialEq)]
pub struct Octant {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    levels: u32,
}

impl Octant {
    /// Builds the grid with each edge split into `2^levels` segments.
    ///
    /// `levels = 0` yields the undivided triangle `(1,0,0) (0,1,0) (0,0,1)`.
    ///
    /// # Panics
    ///
    /// If `levels` is greater than [`MAX_LEVELS`].
    pub fn new(levels: u32) -> Self {
        let (positions, indices) = planar_grid(levels);
        let vertices = positions
            .into_iter()
            .map(|p| Vertex {
                position: p.normalize().to_array(),
            })
            .collect();

        Self {
            vertices,
            indices,
            levels,
        }
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Index triples, one per triangle, in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }
}

/// Flat grid before projection onto the sphere.
///
/// Vertices are laid out row by row from the apex. Row `r` holds `N - r + 1`
/// vertices; row `r + 1` is generated before any triangle between `r` and
/// `r + 1` is emitted, so an index never points past the vertices already built.
fn planar_grid(levels: u32) -> (Vec<Vec3>, Vec<u32>) {
    let n = segments(levels);
    let d = 1.0 / n as f32;
    let along_row = Vec3::new(-d, d, 0.0);
    let next_row = Vec3::new(-d, 0.0, d);

    let mut positions = Vec::with_capacity(vertex_count(levels));
    let mut indices = Vec::with_capacity(index_count(levels));

    push_row(&mut positions, Vec3::X, along_row, n + 1);

    let mut ll = 0u32;
    for r in 0..n {
        let width = n - r;
        let next = ll + width + 1;

        let row_start = positions[ll as usize] + next_row;
        push_row(&mut positions, row_start, along_row, width);

        // Upward: two on this row, one below.
        for s in 1..=width {
            indices.extend_from_slice(&[ll + s - 1, ll + s, next + s - 1]);
        }
        // Downward: one on this row, two below.
        for t in 1..width {
            indices.extend_from_slice(&[ll + t, next + t, next + t - 1]);
        }

        ll = next;
    }

    (positions, indices)
}

fn push_row(positions: &mut Vec<Vec3>, start: Vec3, step: Vec3, count: u32) {
    let mut p = start;
    positions.push(p);
    for _ in 1..count {
        p += step;
        positions.push(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Row of a vertex index, inverted from the row-major layout.
    fn row_of(levels: u32, index: u32) -> u32 {
        let n = 1u32 << levels;
        let mut start = 0;
        for r in 0..=n {
            let width = n - r + 1;
            if index < start + width {
                return r;
            }
            start += width;
        }
        panic!("index {index} is outside the grid");
    }

    fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
        (b - a).cross(c - a).length() * 0.5
    }

    #[test]
    fn test_counts_match_formulas() {
        for levels in 0..=6 {
            let octant = Octant::new(levels);
            let n = 1usize << levels;
            assert_eq!(octant.vertices.len(), (n + 1) * (n + 2) / 2);
            assert_eq!(octant.vertices.len(), vertex_count(levels));
            assert_eq!(octant.indices.len(), 3 * n * n);
            assert_eq!(octant.indices.len(), index_count(levels));
            assert_eq!(octant.indices.len() % 3, 0);
        }
    }

    #[test]
    fn test_default_depth() {
        let octant = Octant::new(DEFAULT_LEVELS);
        assert_eq!(octant.levels(), 3);
        assert_eq!(octant.vertices.len(), 45);
        assert_eq!(octant.indices.len(), 192);
        assert_eq!(octant.triangles().count(), 64);
    }

    #[test]
    fn test_level_zero_is_single_triangle() {
        let octant = Octant::new(0);
        let positions: Vec<_> = octant.vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
        assert_eq!(octant.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_level_one_layout() {
        let octant = Octant::new(1);
        assert_eq!(octant.vertices.len(), 6);
        assert_eq!(octant.indices, vec![0, 1, 3, 1, 2, 4, 1, 4, 3, 3, 4, 5]);
        assert!(octant.indices.iter().all(|&i| i < 6));
    }

    #[test]
    fn test_default_depth_matches_row_major_formula() {
        // Every triangle written straight from the row offsets, upward then downward.
        let n = 8u32;
        let mut expected = Vec::new();
        let mut ll = 0;
        for r in 0..n {
            for s in 1..n - r + 1 {
                expected.extend_from_slice(&[ll + s - 1, ll + s, ll + s + n - r]);
            }
            for t in 1..n - r {
                expected.extend_from_slice(&[ll + t, ll + t + n + 1 - r, ll + t + n - r]);
            }
            ll += n + 1 - r;
        }
        assert_eq!(expected.len(), 192);
        assert_eq!(Octant::new(3).indices, expected);
    }

    #[test]
    fn test_indices_in_bounds() {
        for levels in 0..=5 {
            let octant = Octant::new(levels);
            let count = octant.vertices.len() as u32;
            assert!(octant.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        for levels in 0..=5 {
            for v in &Octant::new(levels).vertices {
                let len = Vec3::from(v.position).length();
                assert!((len - 1.0).abs() < 1e-5, "|{:?}| = {len}", v.position);
            }
        }
    }

    #[test]
    fn test_corners_are_axes() {
        let octant = Octant::new(4);
        let n = 16;
        let corner = |i: usize| Vec3::from(octant.vertices[i].position);
        assert!(corner(0).abs_diff_eq(Vec3::X, 1e-6));
        assert!(corner(n).abs_diff_eq(Vec3::Y, 1e-5));
        assert!(corner(octant.vertices.len() - 1).abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_regeneration_is_identical() {
        let a = Octant::new(4);
        let b = Octant::new(4);
        assert_eq!(a.indices, b.indices);
        let bits = |o: &Octant| {
            o.vertices
                .iter()
                .flat_map(|v| v.position.map(f32::to_bits))
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_no_degenerate_triangles() {
        for levels in 0..=5 {
            for [a, b, c] in Octant::new(levels).triangles() {
                assert!(a != b && b != c && a != c, "degenerate [{a}, {b}, {c}]");
            }
        }
    }

    #[test]
    fn test_triangles_join_adjacent_rows() {
        for levels in 0..=4 {
            for tri in Octant::new(levels).triangles() {
                let rows = tri.map(|i| row_of(levels, i));
                let top = *rows.iter().min().unwrap();
                let bottom = *rows.iter().max().unwrap();
                assert_eq!(bottom, top + 1, "{tri:?} spans rows {rows:?}");
            }
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        for levels in 0..=4 {
            let octant = Octant::new(levels);
            let p = |i: u32| Vec3::from(octant.vertices[i as usize].position);
            for [a, b, c] in octant.triangles() {
                let (a, b, c) = (p(a), p(b), p(c));
                let normal = (b - a).cross(c - a);
                assert!(normal.dot(a + b + c) > 0.0);
            }
        }
    }

    #[test]
    fn test_planar_grid_covers_triangle_once() {
        for levels in 0..=4 {
            let (positions, indices) = planar_grid(levels);
            let n = 1u32 << levels;

            let area: f32 = indices
                .chunks_exact(3)
                .map(|t| {
                    triangle_area(
                        positions[t[0] as usize],
                        positions[t[1] as usize],
                        positions[t[2] as usize],
                    )
                })
                .sum();
            let whole = triangle_area(Vec3::X, Vec3::Y, Vec3::Z);
            assert!((area - whole).abs() < 1e-4, "area {area} vs {whole}");

            let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
            for t in indices.chunks_exact(3) {
                for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                    *edges.entry((a.min(b), a.max(b))).or_default() += 1;
                }
            }
            assert!(edges.values().all(|&uses| uses == 1 || uses == 2));
            let boundary = edges.values().filter(|&&uses| uses == 1).count();
            assert_eq!(boundary as u32, 3 * n);
        }
    }

    #[test]
    #[should_panic(expected = "exceeds the u32 index range")]
    fn test_rejects_oversized_depth() {
        vertex_count(MAX_LEVELS + 1);
    }
}
