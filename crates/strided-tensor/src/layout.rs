// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape plus strides: how logical indices map onto a flat buffer.
//!
//! The element at indices `[i0, i1, ..., in]` lives at
//! `i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]`.
//! Strides are counted in elements, not bytes.

use crate::{Shape, TensorError};

/// Memory layout of a tensor or view.
///
/// A layout always carries one stride per dimension. Deserialization goes
/// through the same check, see [`Layout::from_parts`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct Layout {
    shape: Shape,
    strides: Vec<usize>,
}

impl Layout {
    /// Creates a row-major layout for `shape`.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::{Layout, Shape};
    /// let layout = Layout::contiguous(Shape::new(vec![2, 3, 4])).unwrap();
    /// assert_eq!(layout.strides(), &[12, 4, 1]);
    /// assert!(layout.is_contiguous());
    /// ```
    ///
    /// # Errors
    /// [`TensorError::Overflow`] if a stride does not fit in `usize`.
    pub fn contiguous(shape: Shape) -> Result<Self, TensorError> {
        let strides = shape.strides()?;
        Ok(Self { shape, strides })
    }

    /// Row-major layout for a shape that already passed
    /// [`Shape::checked_num_elements`].
    pub(crate) fn packed(shape: Shape) -> Self {
        let strides = shape.packed_strides();
        Self { shape, strides }
    }

    /// Builds a layout from explicit strides.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `strides.len() != shape.rank()`.
    /// - [`TensorError::InvalidShape`] / [`TensorError::Overflow`] if the shape
    ///   is malformed or its furthest offset does not fit in `usize`.
    pub fn from_parts(shape: Shape, strides: Vec<usize>) -> Result<Self, TensorError> {
        if strides.len() != shape.rank() {
            return Err(TensorError::InvalidArgument {
                op: "layout",
                detail: format!("{} strides for shape {shape}", strides.len()),
            });
        }
        if shape.is_empty() {
            return Ok(Self { shape, strides });
        }
        shape.checked_num_elements()?;
        let overflow = || TensorError::Overflow {
            dims: shape.dims().to_vec(),
        };
        let mut max_offset = 0usize;
        for (&dim, &stride) in shape.dims().iter().zip(&strides) {
            max_offset = (dim - 1)
                .checked_mul(stride)
                .and_then(|span| max_offset.checked_add(span))
                .ok_or_else(overflow)?;
        }
        // Offsets steps one stride past the last index before wrapping.
        let widest = strides.iter().copied().max().unwrap_or(0);
        max_offset.checked_add(widest).ok_or_else(overflow)?;
        Ok(Self { shape, strides })
    }

    /// Returns the logical shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the per-dimension strides.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Number of logical elements.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Returns `true` if the strides match the row-major formula exactly.
    ///
    /// Walks from the innermost dimension outwards, tracking the stride a
    /// packed layout would have. The empty layout is contiguous.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = 1usize;
        for (&dim, &stride) in self.shape.dims().iter().zip(&self.strides).rev() {
            if stride != expected {
                return false;
            }
            expected = expected.saturating_mul(dim);
        }
        true
    }

    /// Reorders dimensions so that output axis `i` is input axis `axes[i]`.
    ///
    /// # Errors
    /// [`TensorError::InvalidArgument`] unless `axes` is a permutation of `0..rank`.
    pub fn permute(&self, axes: &[usize]) -> Result<Self, TensorError> {
        let rank = self.rank();
        if axes.len() != rank {
            return Err(TensorError::InvalidArgument {
                op: "permute",
                detail: format!("expected {rank} axes, got {}", axes.len()),
            });
        }
        let mut seen = vec![false; rank];
        for &axis in axes {
            if axis >= rank {
                return Err(TensorError::InvalidArgument {
                    op: "permute",
                    detail: format!("axis {axis} out of range for rank {rank}"),
                });
            }
            if std::mem::replace(&mut seen[axis], true) {
                return Err(TensorError::InvalidArgument {
                    op: "permute",
                    detail: format!("axis {axis} repeated in {axes:?}"),
                });
            }
        }
        let dims = self.shape.dims();
        let shape = Shape::new(axes.iter().map(|&a| dims[a]).collect());
        let strides = axes.iter().map(|&a| self.strides[a]).collect();
        Ok(Self { shape, strides })
    }

    /// Removes the size-1 dimension at `axis`.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `axis >= rank`.
    /// - [`TensorError::InvalidShape`] if the dimension is not 1, or is the only one.
    pub fn squeeze(&self, axis: usize) -> Result<Self, TensorError> {
        let rank = self.rank();
        if axis >= rank {
            return Err(TensorError::InvalidArgument {
                op: "squeeze",
                detail: format!("axis {axis} out of range for rank {rank}"),
            });
        }
        let size = self.shape.dims()[axis];
        if size != 1 {
            return Err(TensorError::InvalidShape {
                reason: format!("cannot squeeze axis {axis} of size {size} in {}", self.shape),
            });
        }
        if rank == 1 {
            return Err(TensorError::InvalidShape {
                reason: "cannot squeeze the only dimension".into(),
            });
        }
        let mut dims = self.shape.dims().to_vec();
        let mut strides = self.strides.clone();
        dims.remove(axis);
        strides.remove(axis);
        Ok(Self {
            shape: Shape::new(dims),
            strides,
        })
    }

    /// Inserts a size-1 dimension at `axis` (valid range `0..=rank`).
    ///
    /// # Errors
    /// [`TensorError::InvalidArgument`] if `axis > rank`.
    pub fn unsqueeze(&self, axis: usize) -> Result<Self, TensorError> {
        let rank = self.rank();
        if axis > rank {
            return Err(TensorError::InvalidArgument {
                op: "unsqueeze",
                detail: format!("axis {axis} out of range 0..={rank}"),
            });
        }
        // The new axis steps over everything to its right, which keeps a
        // packed layout packed.
        let stride = if axis < rank {
            self.strides[axis].saturating_mul(self.shape.dims()[axis])
        } else {
            1
        };
        let mut dims = self.shape.dims().to_vec();
        let mut strides = self.strides.clone();
        dims.insert(axis, 1);
        strides.insert(axis, stride);
        Ok(Self {
            shape: Shape::new(dims),
            strides,
        })
    }

    /// Iterates buffer offsets in logical row-major index order.
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets {
            layout: self,
            index: vec![0; self.rank()],
            current: 0,
            remaining: self.num_elements(),
        }
    }
}

#[derive(serde::Deserialize)]
struct RawLayout {
    shape: Shape,
    strides: Vec<usize>,
}

impl TryFrom<RawLayout> for Layout {
    type Error = TensorError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        Layout::from_parts(raw.shape, raw.strides)
    }
}

/// Iterator over the buffer offsets of a [`Layout`], see [`Layout::offsets`].
#[derive(Debug)]
pub struct Offsets<'a> {
    layout: &'a Layout,
    index: Vec<usize>,
    current: usize,
    remaining: usize,
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let out = self.current;

        let dims = self.layout.shape.dims();
        for d in (0..dims.len()).rev() {
            self.index[d] += 1;
            self.current += self.layout.strides[d];
            if self.index[d] < dims[d] {
                break;
            }
            self.current -= self.layout.strides[d] * dims[d];
            self.index[d] = 0;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}
