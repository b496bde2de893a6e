// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type and view abstractions.

use crate::{Layout, Shape, TensorConfig, TensorError};

/// An owned, n-dimensional `f32` tensor stored in contiguous memory.
///
/// `Tensor` has value semantics: cloning duplicates the buffer and no two
/// tensors ever share storage. Borrowed, possibly strided access goes through
/// [`TensorView`].
///
/// # Memory Layout
/// Data is stored in row-major (C) order. Every operation that returns a
/// `Tensor` returns one whose strides follow the row-major formula.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tensor {
    layout: Layout,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Errors
    /// - [`TensorError::InvalidShape`] if `shape` is empty or has a zero dimension.
    /// - [`TensorError::Overflow`] if the element count does not fit in `usize`.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Tensor;
    /// let t = Tensor::zeros([2, 3]).unwrap();
    /// assert_eq!(t.numel(), 6);
    /// assert!(t.is_contiguous());
    /// ```
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self, TensorError> {
        Self::full(shape, 0.0)
    }

    /// Creates a new tensor with every element set to `value`.
    pub fn full(shape: impl Into<Shape>, value: f32) -> Result<Self, TensorError> {
        let shape = shape.into();
        let numel = shape.checked_num_elements()?;
        Ok(Self {
            layout: Layout::contiguous(shape)?,
            data: vec![value; numel],
        })
    }

    /// Creates a zero-filled tensor, enforcing the element limit in `config`.
    ///
    /// # Errors
    /// As [`Tensor::zeros`], plus [`TensorError::ElementLimit`] when the tensor
    /// would hold more than `config.max_elements` values.
    pub fn with_config(shape: impl Into<Shape>, config: &TensorConfig) -> Result<Self, TensorError> {
        let shape = shape.into();
        let numel = shape.checked_num_elements()?;
        config.check_elements(numel)?;
        Ok(Self {
            layout: Layout::contiguous(shape)?,
            data: vec![0.0; numel],
        })
    }

    /// Creates a tensor that takes ownership of `data`.
    ///
    /// # Errors
    /// As [`Tensor::zeros`], plus [`TensorError::BufferSizeMismatch`] if
    /// `data.len()` differs from the element count of `shape`.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Tensor;
    /// let t = Tensor::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn from_vec(shape: impl Into<Shape>, data: Vec<f32>) -> Result<Self, TensorError> {
        let shape = shape.into();
        let expected = shape.checked_num_elements()?;
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            layout: Layout::contiguous(shape)?,
            data,
        })
    }

    /// Creates a tensor from a slice of `f32` values.
    pub fn from_f32(shape: impl Into<Shape>, values: &[f32]) -> Result<Self, TensorError> {
        Self::from_vec(shape, values.to_vec())
    }

    /// Assembles a tensor from a row-major buffer the caller already sized.
    pub(crate) fn from_contiguous(shape: Shape, data: Vec<f32>) -> Self {
        debug_assert_eq!(shape.num_elements(), data.len());
        Self {
            layout: Layout::packed(shape),
            data,
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        self.layout.shape()
    }

    /// Returns the tensor's strides, in elements.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Returns the tensor's layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.layout.rank()
    }

    /// Number of elements held in the buffer.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// See [`Layout::is_contiguous`].
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Returns the backing buffer in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the backing buffer for in-place writes.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the tensor and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Returns a borrowed view over this tensor's data.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            layout: self.layout.clone(),
            data: &self.data,
        }
    }

    pub(crate) fn from_parts(layout: Layout, data: Vec<f32>) -> Self {
        Self { layout, data }
    }
}

/// A borrowed, read-only and possibly strided view over a [`Tensor`]'s data.
///
/// Views are zero-copy and tied to the lifetime of the source tensor,
/// enforced by the borrow checker. A view carries its own [`Layout`], so
/// [`TensorView::permute`] can reorder axes without moving any data; the
/// result is then generally not contiguous.
#[derive(Debug, Clone)]
pub struct TensorView<'a> {
    layout: Layout,
    data: &'a [f32],
}

impl<'a> TensorView<'a> {
    /// Creates a view from raw parts (used internally by tensor ops).
    pub(crate) fn from_parts(layout: Layout, data: &'a [f32]) -> Self {
        Self { layout, data }
    }

    /// Returns the logical shape of the view.
    pub fn shape(&self) -> &Shape {
        self.layout.shape()
    }

    /// Returns the view's strides into the backing buffer.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Returns the view's layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.layout.rank()
    }

    /// Number of logical elements.
    pub fn numel(&self) -> usize {
        self.layout.num_elements()
    }

    /// See [`Layout::is_contiguous`].
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Returns the elements as a row-major slice, or `None` if the view is strided.
    pub fn as_slice(&self) -> Option<&'a [f32]> {
        let data: &'a [f32] = self.data;
        if self.is_contiguous() {
            Some(&data[..self.numel()])
        } else {
            None
        }
    }

    /// Iterates the elements in logical row-major index order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.layout.offsets().map(move |off| self.data[off])
    }

    /// Gathers the viewed elements into a new contiguous tensor.
    pub fn to_tensor(&self) -> Tensor {
        let data = match self.as_slice() {
            Some(slice) => slice.to_vec(),
            None => self.iter().collect(),
        };
        Tensor::from_contiguous(self.shape().clone(), data)
    }

    pub(crate) fn buffer(&self) -> &'a [f32] {
        self.data
    }
}

impl From<&TensorView<'_>> for Tensor {
    fn from(view: &TensorView<'_>) -> Self {
        view.to_tensor()
    }
}
