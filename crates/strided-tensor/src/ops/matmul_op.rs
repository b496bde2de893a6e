// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Batched matrix multiplication.

use crate::{Shape, Tensor, TensorError, TensorView};

/// Performs batched matrix multiplication: `lhs @ rhs`.
///
/// Operands are `[..batch, m, k]` and `[..batch, k, p]`.
///
/// - A 1-D `lhs` of length `n` is treated as `[1, n]` and the `m` axis is
///   dropped from the output; a 1-D `rhs` is treated as `[n, 1]` and the
///   `p` axis is dropped. Two 1-D operands produce a dot product of shape `[1]`.
/// - Batch dimensions are not broadcast. If both operands carry them they
///   must be identical; if only one does, the other operand's single matrix
///   is reused for every batch slice.
///
/// # Errors
/// - [`TensorError::NotContiguous`] if either operand is strided.
/// - [`TensorError::InvalidRank`] if either operand is the empty tensor.
/// - [`TensorError::IncompatibleInnerDim`] if `k` differs.
/// - [`TensorError::BatchShapeMismatch`] if both batch shapes exist and differ.
pub fn matmul(lhs: &TensorView<'_>, rhs: &TensorView<'_>) -> Result<Tensor, TensorError> {
    let (Some(a), Some(b)) = (lhs.as_slice(), rhs.as_slice()) else {
        return Err(TensorError::NotContiguous { op: "matmul" });
    };

    // Promote vectors to matrices.
    let lhs_vec = lhs.ndim() == 1;
    let rhs_vec = rhs.ndim() == 1;
    let lhs_shape = if lhs_vec {
        Shape::matrix(1, lhs.shape().dims()[0])
    } else {
        lhs.shape().clone()
    };
    let rhs_shape = if rhs_vec {
        Shape::matrix(rhs.shape().dims()[0], 1)
    } else {
        rhs.shape().clone()
    };

    let (Some((lhs_batch, m, k)), Some((rhs_batch, k2, p))) =
        (lhs_shape.split_matrix(), rhs_shape.split_matrix())
    else {
        return Err(TensorError::InvalidRank {
            op: "matmul",
            min: 1,
            actual: lhs.ndim().min(rhs.ndim()),
        });
    };

    if k != k2 {
        return Err(TensorError::IncompatibleInnerDim {
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }

    let batch: &[usize] = match (lhs_batch.is_empty(), rhs_batch.is_empty()) {
        (false, false) if lhs_batch != rhs_batch => {
            return Err(TensorError::BatchShapeMismatch {
                lhs: Shape::from(lhs_batch),
                rhs: Shape::from(rhs_batch),
            });
        }
        (false, _) => lhs_batch,
        (true, _) => rhs_batch,
    };
    let batch_count: usize = batch.iter().product();

    let mut out_dims = batch.to_vec();
    match (lhs_vec, rhs_vec) {
        (true, true) => out_dims = vec![1],
        (true, false) => out_dims.push(p),
        (false, true) => out_dims.push(m),
        (false, false) => out_dims.extend([m, p]),
    }

    tracing::debug!(
        "matmul {} x {} -> {:?} ({batch_count} batches)",
        lhs.shape(),
        rhs.shape(),
        out_dims
    );

    // Vector results are still computed as [1, p] or [m, 1] slices.
    let mut c = vec![0.0f32; batch_count * m * p];
    let lhs_batched = !lhs_batch.is_empty();
    let rhs_batched = !rhs_batch.is_empty();
    let a_block = m * k;
    let b_block = k * p;
    let c_block = m * p;

    for bi in 0..batch_count {
        let a_base = if lhs_batched { bi * a_block } else { 0 };
        let b_base = if rhs_batched { bi * b_block } else { 0 };
        tracing::trace!("matmul batch {bi}: lhs@{a_base} rhs@{b_base}");
        matmul_f32_generic(
            &a[a_base..a_base + a_block],
            &b[b_base..b_base + b_block],
            &mut c[bi * c_block..(bi + 1) * c_block],
            m,
            k,
            p,
        );
    }

    Ok(Tensor::from_contiguous(Shape::new(out_dims), c))
}

/// Naive f32 matrix multiplication of one `[m, k] x [k, n]` slice.
///
/// Accumulates each output element with a plain inner-product loop, in `f32`.
fn matmul_f32_generic(a: &[f32], b: &[f32], c: &mut [f32], m: usize, k: usize, n: usize) {
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for t in 0..k {
                sum += a[i * k + t] * b[t * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

impl Tensor {
    /// Batched matrix product of `self` and `rhs`; see [`matmul`](crate::matmul).
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::Tensor;
    /// let v = Tensor::from_vec([3], vec![1.0, 2.0, 3.0]).unwrap();
    /// let w = Tensor::from_vec([3], vec![4.0, 5.0, 6.0]).unwrap();
    /// let dot = v.matmul(&w).unwrap();
    /// assert_eq!(dot.shape().dims(), &[1]);
    /// assert_eq!(dot.data(), &[32.0]);
    /// ```
    pub fn matmul(&self, rhs: &Tensor) -> Result<Tensor, TensorError> {
        matmul(&self.view(), &rhs.view())
    }
}
