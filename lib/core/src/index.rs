use crate::vector::squared_l2;
use crate::{Error, Result, Vector};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::BinaryHeap;

/// Pools at least this large have their distances computed in parallel
const PARALLEL_THRESHOLD: usize = 1024;

/// A search hit: insertion position and squared L2 distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// Exact nearest-neighbour index over squared Euclidean distance.
///
/// Vectors are stored contiguously and scanned in full on every query, so
/// results are exact. Positions are assigned in insertion order.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dim: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            data: Vec::new(),
        }
    }

    /// Build an index from a batch of vectors, taking the dimension from the first one
    pub fn from_vectors(vectors: &[Vector]) -> Result<Self> {
        let dim = vectors.first().map(Vector::dim).unwrap_or(0);
        let mut index = Self::new(dim);
        index.add(vectors)?;
        Ok(index)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append vectors. The whole batch is rejected if any vector has the wrong dimension.
    pub fn add(&mut self, vectors: &[Vector]) -> Result<()> {
        if let Some(bad) = vectors.iter().find(|v| v.dim() != self.dim) {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: bad.dim(),
            });
        }

        self.data.reserve(vectors.len() * self.dim);
        for vector in vectors {
            self.data.extend_from_slice(vector.as_slice());
        }
        Ok(())
    }

    /// Return the `k` closest vectors, nearest first. Equal distances keep insertion order.
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }

        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let q = query.as_slice();
        let distances: Vec<f32> = if self.len() >= PARALLEL_THRESHOLD {
            self.data
                .par_chunks_exact(self.dim)
                .map(|row| squared_l2(row, q))
                .collect()
        } else {
            self.data
                .chunks_exact(self.dim)
                .map(|row| squared_l2(row, q))
                .collect()
        };

        // Bounded max-heap keeps the k best; the worst candidate sits on top
        let mut heap: BinaryHeap<(OrderedFloat<f32>, usize)> = BinaryHeap::with_capacity(k + 1);
        for (position, distance) in distances.into_iter().enumerate() {
            let entry = (OrderedFloat(distance), position);
            if heap.len() < k {
                heap.push(entry);
            } else if let Some(worst) = heap.peek() {
                if entry < *worst {
                    heap.pop();
                    heap.push(entry);
                }
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, position)| Neighbor {
                position,
                distance: distance.into_inner(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(rows: &[[f32; 2]]) -> FlatIndex {
        let vectors: Vec<Vector> = rows.iter().map(|r| Vector::from_slice(r)).collect();
        FlatIndex::from_vectors(&vectors).unwrap()
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = index_of(&[[5.0, 5.0], [1.0, 0.0], [0.0, 0.0], [3.0, 4.0]]);
        let hits = index.search(&Vector::new(vec![0.0, 0.0]), 3).unwrap();

        let positions: Vec<usize> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![2, 1, 3]);
        assert_eq!(hits[0].distance, 0.0);
        assert!((hits[2].distance - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_k_clamped_to_len() {
        let index = index_of(&[[1.0, 1.0], [2.0, 2.0]]);
        let hits = index.search(&Vector::new(vec![0.0, 0.0]), 10).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = index_of(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]);
        let hits = index.search(&Vector::new(vec![0.0, 0.0]), 2).unwrap();
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[1].position, 1);
    }

    #[test]
    fn test_empty_index_and_zero_k() {
        let index = FlatIndex::new(3);
        assert!(index.is_empty());
        assert!(index.search(&Vector::new(vec![0.0; 3]), 5).unwrap().is_empty());

        let index = index_of(&[[1.0, 1.0]]);
        assert!(index.search(&Vector::new(vec![0.0, 0.0]), 0).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_checks() {
        let mut index = FlatIndex::new(2);
        let err = index
            .add(&[Vector::new(vec![1.0, 2.0]), Vector::new(vec![1.0])])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 2, actual: 1 }));
        assert_eq!(index.len(), 0);

        index.add(&[Vector::new(vec![1.0, 2.0])]).unwrap();
        assert!(index.search(&Vector::new(vec![1.0, 2.0, 3.0]), 1).is_err());
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let vectors: Vec<Vector> = (0..(PARALLEL_THRESHOLD + 10))
            .map(|i| Vector::new(vec![i as f32, 0.0]))
            .collect();
        let index = FlatIndex::from_vectors(&vectors).unwrap();
        let hits = index.search(&Vector::new(vec![500.2, 0.0]), 3).unwrap();
        let positions: Vec<usize> = hits.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![500, 501, 499]);
    }
}
