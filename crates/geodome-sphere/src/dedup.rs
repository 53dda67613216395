//! Vertex deduplication: resolve a candidate position to an existing vertex index
//! or append it to the table.
//!
//! Adjacent triangles compute the midpoint of their shared edge independently, so
//! the same geometric point is offered to the table twice per pass. The policy
//! decides when two candidates count as the same vertex.

use glam::DVec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::GeodomeError;

/// Default merge distance for [`DedupPolicy::Tolerance`], relative to unit-sphere scale.
pub const DEFAULT_DEDUP_EPSILON: f64 = 1e-7;

/// How candidate vertices are matched against the table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DedupPolicy {
    /// Bit-for-bit equality of all three components.
    ///
    /// Only sound while every shared point is computed by the same deterministic
    /// expression from the same inputs.
    Exact,
    /// Euclidean distance `<= epsilon`; the oldest matching vertex wins.
    Tolerance { epsilon: f64 },
    /// Same answers as [`DedupPolicy::Tolerance`], found through a quantized grid
    /// instead of a linear scan.
    SpatialHash { epsilon: f64 },
    /// Append every candidate. Shared edges end up with two vertices each.
    None,
}

impl Default for DedupPolicy {
    fn default() -> Self {
        Self::Tolerance {
            epsilon: DEFAULT_DEDUP_EPSILON,
        }
    }
}

impl DedupPolicy {
    /// Reject tolerances that are zero, negative or not finite.
    pub fn validate(&self) -> Result<(), GeodomeError> {
        match *self {
            Self::Tolerance { epsilon } | Self::SpatialHash { epsilon }
                if !(epsilon.is_finite() && epsilon > 0.0) =>
            {
                Err(GeodomeError::InvalidEpsilon(epsilon))
            }
            _ => Ok(()),
        }
    }

    /// Whether this policy ever maps two candidates to the same index.
    pub fn merges(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[inline]
fn within(a: DVec3, b: DVec3, epsilon: f64) -> bool {
    a.distance_squared(b) <= epsilon * epsilon
}

#[inline]
fn bit_key(p: DVec3) -> [u64; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

/// Cell coordinates at or beyond this magnitude lose integer precision in `f64`.
const GRID_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Grid cell of `p`, or `None` when the quantized coordinates are not exact integers.
#[inline]
fn cell_of(p: DVec3, epsilon: f64) -> Option<[i64; 3]> {
    let c = (p / epsilon).floor();
    (c.abs().max_element() < GRID_LIMIT).then(|| [c.x as i64, c.y as i64, c.z as i64])
}

/// Lowest index in `vertices` within `epsilon` of `p`.
#[inline]
fn scan(vertices: &[DVec3], p: DVec3, epsilon: f64) -> Option<u32> {
    vertices
        .iter()
        .position(|&v| within(v, p, epsilon))
        .map(|i| i as u32)
}

enum Lookup {
    Exact(FxHashMap<[u64; 3], u32>),
    Scan { epsilon: f64 },
    Grid {
        epsilon: f64,
        cells: FxHashMap<[i64; 3], Vec<u32>>,
        // Vertices too far out (or epsilon too small) to quantize; always scanned.
        outliers: Vec<u32>,
    },
    Append,
}

/// Growing vertex arena with policy-driven lookup.
///
/// Indices are assigned in insertion order and never change. Seed vertices keep
/// their original indices.
pub struct VertexTable {
    vertices: Vec<DVec3>,
    lookup: Lookup,
}

impl VertexTable {
    /// Start a table that already contains `seed`, in order.
    ///
    /// # Errors
    ///
    /// [`GeodomeError::InvalidEpsilon`] for an unusable tolerance.
    pub fn seeded(seed: Vec<DVec3>, policy: DedupPolicy) -> Result<Self, GeodomeError> {
        policy.validate()?;
        let lookup = match policy {
            DedupPolicy::Exact => Lookup::Exact(FxHashMap::default()),
            DedupPolicy::Tolerance { epsilon } => Lookup::Scan { epsilon },
            DedupPolicy::SpatialHash { epsilon } => Lookup::Grid {
                epsilon,
                cells: FxHashMap::default(),
                outliers: Vec::new(),
            },
            DedupPolicy::None => Lookup::Append,
        };

        let mut table = Self {
            vertices: Vec::with_capacity(seed.len()),
            lookup,
        };
        for p in seed {
            table.push(p)?;
        }
        Ok(table)
    }

    /// Number of vertices, seed included.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// `true` when the table holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Positions in index order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Consume the table, keeping the positions in index order.
    pub fn into_vertices(self) -> Vec<DVec3> {
        self.vertices
    }

    /// Index of the first vertex matching `p` under the table's policy.
    pub fn find(&self, p: DVec3) -> Option<u32> {
        match &self.lookup {
            Lookup::Exact(map) => map.get(&bit_key(p)).copied(),
            Lookup::Scan { epsilon } => scan(&self.vertices, p, *epsilon),
            Lookup::Grid {
                epsilon,
                cells,
                outliers,
            } => {
                let Some([cx, cy, cz]) = cell_of(p, *epsilon) else {
                    return scan(&self.vertices, p, *epsilon);
                };
                // Outliers are kept in insertion order, so the first hit is the lowest index.
                let mut best = outliers
                    .iter()
                    .copied()
                    .find(|&i| within(self.vertices[i as usize], p, *epsilon));
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let Some(bucket) = cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                                continue;
                            };
                            for &i in bucket {
                                if best.is_some_and(|b| b <= i) {
                                    continue;
                                }
                                if within(self.vertices[i as usize], p, *epsilon) {
                                    best = Some(i);
                                }
                            }
                        }
                    }
                }
                best
            }
            Lookup::Append => None,
        }
    }

    /// Return the index of a vertex matching `p`, appending `p` if none does.
    ///
    /// # Errors
    ///
    /// [`GeodomeError::VertexTableFull`] once the `u32` index space is exhausted.
    pub fn find_or_insert(&mut self, p: DVec3) -> Result<u32, GeodomeError> {
        match self.find(p) {
            Some(i) => Ok(i),
            None => self.push(p),
        }
    }

    fn push(&mut self, p: DVec3) -> Result<u32, GeodomeError> {
        let index = u32::try_from(self.vertices.len())
            .map_err(|_| GeodomeError::VertexTableFull(self.vertices.len()))?;
        self.vertices.push(p);
        match &mut self.lookup {
            Lookup::Exact(map) => {
                // Keep the oldest index when the seed itself contains duplicates.
                map.entry(bit_key(p)).or_insert(index);
            }
            Lookup::Grid {
                epsilon,
                cells,
                outliers,
            } => match cell_of(p, *epsilon) {
                Some(cell) => cells.entry(cell).or_default().push(index),
                None => outliers.push(index),
            },
            Lookup::Scan { .. } | Lookup::Append => {}
        }
        Ok(index)
    }
}
