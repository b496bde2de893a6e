// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reshape and the view-reshaping family: squeeze, unsqueeze, permute.
//!
//! On an owned [`Tensor`], `reshape`, `squeeze` and `unsqueeze` return a new
//! owned tensor. `permute` only ever returns a [`TensorView`] borrowing the
//! source buffer with reordered strides; call [`TensorView::to_tensor`] to
//! materialize it.

use crate::{Layout, Shape, Tensor, TensorError, TensorView};

/// Builds the row-major layout for `shape` over `source`'s elements.
fn reshape_layout(source: &Layout, shape: Shape) -> Result<Layout, TensorError> {
    let expected = shape.checked_num_elements()?;
    let actual = source.num_elements();
    if expected != actual {
        return Err(TensorError::SizeMismatch { expected, actual });
    }
    if !source.is_contiguous() {
        return Err(TensorError::NotContiguous { op: "reshape" });
    }
    Layout::contiguous(shape)
}

impl Tensor {
    /// Returns a copy of this tensor under a new shape, preserving linear order.
    ///
    /// # Errors
    /// - [`TensorError::InvalidShape`] / [`TensorError::Overflow`] for malformed `shape`.
    /// - [`TensorError::SizeMismatch`] if the element counts differ.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Tensor;
    /// let t = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let r = t.reshape([3, 2]).unwrap();
    /// assert_eq!(r.strides(), &[2, 1]);
    /// assert_eq!(r.data(), t.data());
    /// ```
    pub fn reshape(&self, shape: impl Into<Shape>) -> Result<Tensor, TensorError> {
        let layout = reshape_layout(self.layout(), shape.into())?;
        Ok(Tensor::from_parts(layout, self.data().to_vec()))
    }

    /// Like [`Tensor::reshape`], but reuses this tensor's buffer.
    pub fn into_reshape(self, shape: impl Into<Shape>) -> Result<Tensor, TensorError> {
        let layout = reshape_layout(self.layout(), shape.into())?;
        Ok(Tensor::from_parts(layout, self.into_vec()))
    }

    /// Removes the size-1 dimension at `axis`.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `axis >= ndim()`.
    /// - [`TensorError::InvalidShape`] if that dimension is not 1 or is the only one.
    pub fn squeeze(&self, axis: usize) -> Result<Tensor, TensorError> {
        let layout = self.layout().squeeze(axis)?;
        Ok(Tensor::from_parts(layout, self.data().to_vec()))
    }

    /// Inserts a size-1 dimension at `axis`, which may range over `0..=ndim()`.
    ///
    /// # Errors
    /// - [`TensorError::InvalidArgument`] if `axis > ndim()`.
    /// - [`TensorError::InvalidShape`] on the empty tensor.
    pub fn unsqueeze(&self, axis: usize) -> Result<Tensor, TensorError> {
        if self.ndim() == 0 {
            return Err(TensorError::InvalidShape {
                reason: "cannot unsqueeze an empty tensor".into(),
            });
        }
        let layout = self.layout().unsqueeze(axis)?;
        Ok(Tensor::from_parts(layout, self.data().to_vec()))
    }

    /// Returns a view with dimensions reordered so that axis `i` of the view
    /// is axis `axes[i]` of this tensor.
    ///
    /// The view borrows this tensor's buffer; only the shape and strides are
    /// permuted, so the result is non-contiguous unless `axes` is the identity.
    ///
    /// # Errors
    /// [`TensorError::InvalidArgument`] unless `axes` is a permutation of `0..ndim()`.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Tensor;
    /// let t = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let v = t.permute(&[1, 0]).unwrap();
    /// assert_eq!(v.shape().dims(), &[3, 2]);
    /// assert!(!v.is_contiguous());
    /// assert_eq!(v.to_tensor().data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> Result<TensorView<'_>, TensorError> {
        self.view().permute(axes)
    }
}

impl<'a> TensorView<'a> {
    /// Reinterprets a contiguous view under a new shape without copying.
    ///
    /// # Errors
    /// As [`Tensor::reshape`], plus [`TensorError::NotContiguous`] for strided views.
    pub fn reshape(&self, shape: impl Into<Shape>) -> Result<TensorView<'a>, TensorError> {
        let layout = reshape_layout(self.layout(), shape.into())?;
        Ok(TensorView::from_parts(layout, self.buffer()))
    }

    /// View counterpart of [`Tensor::squeeze`].
    pub fn squeeze(&self, axis: usize) -> Result<TensorView<'a>, TensorError> {
        let layout = self.layout().squeeze(axis)?;
        Ok(TensorView::from_parts(layout, self.buffer()))
    }

    /// View counterpart of [`Tensor::unsqueeze`].
    pub fn unsqueeze(&self, axis: usize) -> Result<TensorView<'a>, TensorError> {
        if self.ndim() == 0 {
            return Err(TensorError::InvalidShape {
                reason: "cannot unsqueeze an empty view".into(),
            });
        }
        let layout = self.layout().unsqueeze(axis)?;
        Ok(TensorView::from_parts(layout, self.buffer()))
    }

    /// View counterpart of [`Tensor::permute`].
    pub fn permute(&self, axes: &[usize]) -> Result<TensorView<'a>, TensorError> {
        let layout = self.layout().permute(axes)?;
        Ok(TensorView::from_parts(layout, self.buffer()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(dims: &[usize]) -> Tensor {
        let n: usize = dims.iter().product();
        Tensor::from_vec(dims, (0..n).map(|i| i as f32).collect()).unwrap()
    }

    #[test]
    fn test_reshape_preserves_order() {
        let a = seq(&[2, 3, 4]);
        for dims in [&[24usize][..], &[4, 6][..], &[2, 2, 2, 3][..], &[1, 24, 1][..]] {
            let r = a.reshape(dims).unwrap();
            assert_eq!(r.shape().dims(), dims);
            assert_eq!(r.data(), a.data());
            assert!(r.is_contiguous());
        }
    }

    #[test]
    fn test_reshape_size_mismatch() {
        let a = seq(&[2, 3]);
        assert_eq!(
            a.reshape([4, 2]),
            Err(TensorError::SizeMismatch {
                expected: 8,
                actual: 6
            })
        );
        assert!(matches!(
            a.reshape([6, 0]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_into_reshape_reuses_buffer() {
        let a = seq(&[2, 3]);
        let ptr = a.data().as_ptr();
        let r = a.into_reshape([3, 2]).unwrap();
        assert_eq!(r.data().as_ptr(), ptr);
        assert_eq!(r.strides(), &[2, 1]);
    }

    #[test]
    fn test_squeeze_and_unsqueeze() {
        let a = seq(&[2, 3]);
        let u = a.unsqueeze(1).unwrap();
        assert_eq!(u.shape().dims(), &[2, 1, 3]);
        assert!(u.is_contiguous());
        assert_eq!(u.data(), a.data());

        let s = u.squeeze(1).unwrap();
        assert_eq!(s, a);

        let tail = a.unsqueeze(2).unwrap();
        assert_eq!(tail.shape().dims(), &[2, 3, 1]);
        assert!(matches!(
            a.unsqueeze(3),
            Err(TensorError::InvalidArgument { op: "unsqueeze", .. })
        ));
    }

    #[test]
    fn test_squeeze_rejects_non_unit_axis() {
        let a = seq(&[2, 3]);
        assert!(matches!(a.squeeze(0), Err(TensorError::InvalidShape { .. })));
        assert!(matches!(
            a.squeeze(5),
            Err(TensorError::InvalidArgument { op: "squeeze", .. })
        ));
    }

    #[test]
    fn test_unsqueeze_empty_rejected() {
        assert!(matches!(
            Tensor::default().unsqueeze(0),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_permute_is_a_view() {
        let a = seq(&[2, 3, 4]);
        let v = a.permute(&[2, 0, 1]).unwrap();
        assert_eq!(v.shape().dims(), &[4, 2, 3]);
        assert_eq!(v.strides(), &[1, 12, 4]);
        assert!(!v.is_contiguous());

        let owned = v.to_tensor();
        assert!(owned.is_contiguous());
        // owned[k, i, j] == a[i, j, k]
        assert_eq!(owned.data()[0..3], [0.0, 4.0, 8.0]);
        assert_eq!(owned.data()[6], 1.0);
    }

    #[test]
    fn test_permute_inverse_restores() {
        let a = seq(&[2, 3, 4]);
        let v = a.permute(&[1, 2, 0]).unwrap();
        let back = v.permute(&[2, 0, 1]).unwrap();
        assert!(back.is_contiguous());
        assert_eq!(back.to_tensor(), a);
    }

    #[test]
    fn test_permute_rejects_invalid_axes() {
        let a = seq(&[2, 3]);
        for axes in [&[0usize][..], &[0, 0][..], &[0, 2][..], &[0, 1, 2][..]] {
            assert!(matches!(
                a.permute(axes),
                Err(TensorError::InvalidArgument { op: "permute", .. })
            ));
        }
    }

    #[test]
    fn test_view_reshape_requires_contiguity() {
        let a = seq(&[2, 3]);
        let v = a.permute(&[1, 0]).unwrap();
        assert_eq!(
            v.reshape([6]).unwrap_err(),
            TensorError::NotContiguous { op: "reshape" }
        );

        let flat = a.view().reshape([3, 2]).unwrap();
        assert_eq!(flat.as_slice(), Some(a.data()));
    }

    #[test]
    fn test_view_squeeze_unsqueeze() {
        let a = seq(&[2, 1, 3]);
        let v = a.view().squeeze(1).unwrap().unsqueeze(0).unwrap();
        assert_eq!(v.shape().dims(), &[1, 2, 3]);
        assert!(v.is_contiguous());
    }
}
