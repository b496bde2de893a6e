// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors and dimension utilities.

use crate::TensorError;
use std::fmt;

/// Describes the dimensionality of a [`crate::Tensor`].
///
/// A `Shape` is a plain list of dimension sizes. It does not validate itself
/// on creation; [`Shape::checked_num_elements`] is the gate every tensor
/// constructor goes through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates the empty (rank 0) shape held by the default tensor.
    pub fn empty() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns `true` for the empty shape.
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Returns the total number of elements.
    ///
    /// The empty shape holds no elements. Saturates at `usize::MAX` on
    /// overflow; use [`Shape::checked_num_elements`] for untrusted dimensions.
    pub fn num_elements(&self) -> usize {
        if self.dims.is_empty() {
            0
        } else {
            self.dims.iter().fold(1usize, |acc, &d| acc.saturating_mul(d))
        }
    }

    /// Validates the dimensions and returns their product.
    ///
    /// # Errors
    /// - [`TensorError::InvalidShape`] if the shape is empty or any dimension is zero.
    /// - [`TensorError::Overflow`] if the product does not fit in `usize`.
    pub fn checked_num_elements(&self) -> Result<usize, TensorError> {
        if self.dims.is_empty() {
            return Err(TensorError::InvalidShape {
                reason: "shape must have at least 1 dimension".into(),
            });
        }
        let mut numel = 1usize;
        for (axis, &d) in self.dims.iter().enumerate() {
            if d == 0 {
                return Err(TensorError::InvalidShape {
                    reason: format!("dimension {axis} of {self} is zero"),
                });
            }
            numel = numel.checked_mul(d).ok_or_else(|| TensorError::Overflow {
                dims: self.dims.clone(),
            })?;
        }
        Ok(numel)
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Computes row-major (C-order) strides for this shape.
    ///
    /// The stride for dimension `i` is the number of elements to skip
    /// in the flat buffer to advance one step along that dimension.
    ///
    /// # Errors
    /// [`TensorError::Overflow`] if a stride does not fit in `usize`.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Shape;
    /// assert_eq!(Shape::new(vec![2, 3, 4]).strides().unwrap(), vec![12, 4, 1]);
    /// assert!(Shape::new(vec![2, usize::MAX, 2]).strides().is_err());
    /// ```
    pub fn strides(&self) -> Result<Vec<usize>, TensorError> {
        let mut strides = vec![1usize; self.rank()];
        for i in (0..self.rank().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1]
                .checked_mul(self.dims[i + 1])
                .ok_or_else(|| TensorError::Overflow {
                    dims: self.dims.clone(),
                })?;
        }
        Ok(strides)
    }

    /// Row-major strides for a shape whose element count is known to fit.
    ///
    /// Saturates instead of overflowing, so it is exact for every shape that
    /// passed [`Shape::checked_num_elements`].
    pub(crate) fn packed_strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.rank()];
        for i in (0..self.rank().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1].saturating_mul(self.dims[i + 1]);
        }
        strides
    }

    /// Splits off the trailing two dimensions, returning `(batch, rows, cols)`.
    ///
    /// Returns `None` for shapes of rank < 2.
    pub fn split_matrix(&self) -> Option<(&[usize], usize, usize)> {
        let rank = self.rank();
        if rank < 2 {
            return None;
        }
        Some((&self.dims[..rank - 2], self.dims[rank - 2], self.dims[rank - 1]))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Convenience: `Shape::from(vec![2, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

/// Convenience: `Shape::from(&[2, 3][..])`.
impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

/// Convenience: `Shape::from([2, 3])`.
impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_shape() {
        let s = Shape::empty();
        assert_eq!(s.rank(), 0);
        assert_eq!(s.num_elements(), 0);
        assert_eq!(s.strides(), Ok(vec![]));
    }

    #[test]
    fn test_vector_shape() {
        let s = Shape::vector(5);
        assert_eq!(s.rank(), 1);
        assert_eq!(s.num_elements(), 5);
        assert_eq!(s.strides(), Ok(vec![1]));
    }

    #[test]
    fn test_matrix_shape() {
        let s = Shape::matrix(3, 4);
        assert_eq!(s.rank(), 2);
        assert_eq!(s.num_elements(), 12);
        assert_eq!(s.strides(), Ok(vec![4, 1]));
    }

    #[test]
    fn test_3d_strides() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.strides(), Ok(vec![12, 4, 1]));
        assert_eq!(s.packed_strides(), vec![12, 4, 1]);
    }

    #[test]
    fn test_strides_overflow() {
        let s = Shape::new(vec![2, usize::MAX, 2]);
        assert_eq!(
            s.strides(),
            Err(TensorError::Overflow {
                dims: vec![2, usize::MAX, 2]
            })
        );
        assert_eq!(s.num_elements(), usize::MAX);
        assert!(matches!(
            s.checked_num_elements(),
            Err(TensorError::Overflow { .. })
        ));
    }

    #[test]
    fn test_checked_num_elements() {
        assert_eq!(Shape::new(vec![2, 3, 4]).checked_num_elements(), Ok(24));
        assert!(matches!(
            Shape::empty().checked_num_elements(),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::new(vec![2, 0, 3]).checked_num_elements(),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_checked_num_elements_overflow() {
        let s = Shape::new(vec![usize::MAX, 2]);
        assert_eq!(
            s.checked_num_elements(),
            Err(TensorError::Overflow {
                dims: vec![usize::MAX, 2]
            })
        );
    }

    #[test]
    fn test_split_matrix() {
        let s = Shape::new(vec![5, 2, 3, 4]);
        assert_eq!(s.split_matrix(), Some((&[5, 2][..], 3, 4)));
        assert_eq!(Shape::matrix(3, 4).split_matrix(), Some((&[][..], 3, 4)));
        assert_eq!(Shape::vector(3).split_matrix(), None);
    }

    #[test]
    fn test_display() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(format!("{s}"), "[2, 3, 4]");
    }

    #[test]
    fn test_from_conversions() {
        let s1: Shape = vec![2, 3].into();
        let s2: Shape = (&[2, 3][..]).into();
        let s3: Shape = [2, 3].into();
        assert_eq!(s1, s2);
        assert_eq!(s2, s3);
    }
}
