// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Transpose of the last two axes.

use crate::{Shape, Tensor, TensorError, TensorView};
use std::borrow::Cow;

/// Swaps the last two axes of `input` into a fresh contiguous tensor.
///
/// A rank-2 `[m, n]` input becomes `[n, m]` with `out[j, i] = in[i, j]`.
/// For higher ranks the leading dimensions form a batch that is kept in
/// order; every trailing `[m, n]` slice is transposed on its own.
///
/// Strided inputs are gathered first, so any view is accepted.
///
/// # Errors
/// Returns [`TensorError::InvalidRank`] if `input` has fewer than 2 dimensions.
pub fn transpose(input: &TensorView<'_>) -> Result<Tensor, TensorError> {
    let Some((batch, m, n)) = input.shape().split_matrix() else {
        return Err(TensorError::InvalidRank {
            op: "transpose",
            min: 2,
            actual: input.ndim(),
        });
    };

    let mut dims = batch.to_vec();
    dims.extend([n, m]);
    let num_matrices: usize = batch.iter().product();

    let src: Cow<'_, [f32]> = match input.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(input.iter().collect()),
    };
    let mut dst = vec![0.0f32; src.len()];

    tracing::trace!("transpose {} over {num_matrices} matrices", input.shape());

    let block = m * n;
    for (src_mat, dst_mat) in src.chunks_exact(block).zip(dst.chunks_exact_mut(block)) {
        for i in 0..m {
            for j in 0..n {
                dst_mat[j * m + i] = src_mat[i * n + j];
            }
        }
    }

    Ok(Tensor::from_contiguous(Shape::new(dims), dst))
}

impl Tensor {
    /// Swaps the last two axes; see [`transpose`](crate::transpose).
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Tensor;
    /// let a = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let t = a.transpose().unwrap();
    /// assert_eq!(t.shape().dims(), &[3, 2]);
    /// assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    /// ```
    pub fn transpose(&self) -> Result<Tensor, TensorError> {
        transpose(&self.view())
    }
}

impl TensorView<'_> {
    /// Swaps the last two axes into a new owned tensor; see [`transpose`](crate::transpose).
    pub fn transpose(&self) -> Result<Tensor, TensorError> {
        transpose(self)
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
    fn test_transpose_2d() {
        let a = Tensor::from_f32([2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose().unwrap();
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_transpose_involution() {
        let a = seq(&[4, 7]);
        let back = a.transpose().unwrap().transpose().unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_batched_transpose() {
        // Two [2, 3] slices: [[0,1,2],[3,4,5]] and [[6,7,8],[9,10,11]].
        let a = seq(&[2, 2, 3]);
        let t = a.transpose().unwrap();
        assert_eq!(t.shape().dims(), &[2, 3, 2]);
        assert_eq!(
            t.data(),
            &[0.0, 3.0, 1.0, 4.0, 2.0, 5.0, 6.0, 9.0, 7.0, 10.0, 8.0, 11.0]
        );
    }

    #[test]
    fn test_batched_transpose_keeps_batch_order() {
        let a = seq(&[3, 2, 1, 4]);
        let t = a.transpose().unwrap();
        assert_eq!(t.shape().dims(), &[3, 2, 4, 1]);
        // A [1, 4] slice transposes to [4, 1] with the same linear order.
        assert_eq!(t.data(), a.data());
    }

    #[test]
    fn test_transpose_rank_1_rejected() {
        let a = Tensor::zeros([5]).unwrap();
        assert_eq!(
            a.transpose(),
            Err(TensorError::InvalidRank {
                op: "transpose",
                min: 2,
                actual: 1
            })
        );
        assert!(Tensor::default().transpose().is_err());
    }

    #[test]
    fn test_transpose_of_strided_view() {
        let a = seq(&[2, 3, 4]);
        let v = a.permute(&[2, 0, 1]).unwrap();
        let expected = v.to_tensor().transpose().unwrap();
        assert_eq!(v.transpose().unwrap(), expected);
    }
}
