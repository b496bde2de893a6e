// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor operations.

use crate::Shape;

/// Errors that can occur during tensor operations.
///
/// Every failure is reported before any buffer is touched, so a rejected
/// in-place operation leaves its receiver unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// The requested dimensions are empty, contain a zero, or cannot be
    /// produced by the requested transform.
    #[error("invalid shape: {reason}")]
    InvalidShape { reason: String },

    /// The product of the dimensions does not fit in `usize`.
    #[error("element count overflow for dims {dims:?}")]
    Overflow { dims: Vec<usize> },

    /// The provided buffer length does not match the element count of the shape.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The element count exceeds the limit set in [`crate::TensorConfig`].
    #[error("tensor of {requested} elements exceeds configured limit of {limit}")]
    ElementLimit { requested: usize, limit: usize },

    /// Two tensors have different shapes for an elementwise operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// A reshape target does not hold the same number of elements.
    #[error("cannot reshape {actual} elements into {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The operation requires a row-major contiguous operand.
    #[error("{op} requires contiguous tensors")]
    NotContiguous { op: &'static str },

    /// The inner dimensions of a matrix product disagree.
    #[error("matmul inner dimensions differ: {lhs} x {rhs}")]
    IncompatibleInnerDim { lhs: Shape, rhs: Shape },

    /// Both matmul operands carry batch dimensions, and they differ.
    #[error("matmul batch dimensions must match: {lhs} vs {rhs}")]
    BatchShapeMismatch { lhs: Shape, rhs: Shape },

    /// The tensor has too few dimensions for the operation.
    #[error("{op} requires rank >= {min}, got {actual}")]
    InvalidRank {
        op: &'static str,
        min: usize,
        actual: usize,
    },

    /// An axis index or permutation is malformed.
    #[error("invalid argument to {op}: {detail}")]
    InvalidArgument { op: &'static str, detail: String },

    /// Configuration could not be read, parsed, or validated.
    #[error("configuration error: {0}")]
    Config(String),
}
