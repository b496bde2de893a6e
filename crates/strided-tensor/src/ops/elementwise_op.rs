// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise arithmetic between tensors and between a tensor and a scalar.
//!
//! There is no broadcasting: tensor-tensor operations require identical
//! shapes. Division by zero follows IEEE-754 and yields `inf` or `NaN`.

use crate::{Tensor, TensorError};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// The four arithmetic operators supported elementwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Returns the operation name used in errors and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        }
    }

    #[inline]
    fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }
}

fn check_same_shape(op: BinaryOp, lhs: &Tensor, rhs: &Tensor) -> Result<(), TensorError> {
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op: op.as_str(),
            lhs: lhs.shape().clone(),
            rhs: rhs.shape().clone(),
        });
    }
    Ok(())
}

/// Computes `lhs[i] op rhs[i]` into a new tensor.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn elementwise(lhs: &Tensor, rhs: &Tensor, op: BinaryOp) -> Result<Tensor, TensorError> {
    let mut out = lhs.clone();
    elementwise_in_place(&mut out, rhs, op)?;
    Ok(out)
}

/// Computes `lhs[i] op rhs[i]`, writing into `lhs`.
///
/// `lhs` is untouched when the shapes differ.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
pub fn elementwise_in_place(lhs: &mut Tensor, rhs: &Tensor, op: BinaryOp) -> Result<(), TensorError> {
    check_same_shape(op, lhs, rhs)?;
    tracing::trace!("{} on {}", op.as_str(), lhs.shape());
    for (a, &b) in lhs.data_mut().iter_mut().zip(rhs.data()) {
        *a = op.apply(*a, b);
    }
    Ok(())
}

/// Computes `tensor[i] op scalar` into a new tensor.
pub fn elementwise_scalar(tensor: &Tensor, scalar: f32, op: BinaryOp) -> Tensor {
    let mut out = tensor.clone();
    elementwise_scalar_in_place(&mut out, scalar, op);
    out
}

/// Computes `tensor[i] op scalar` in place.
pub fn elementwise_scalar_in_place(tensor: &mut Tensor, scalar: f32, op: BinaryOp) {
    for a in tensor.data_mut() {
        *a = op.apply(*a, scalar);
    }
}

macro_rules! tensor_arith {
    ($op:ident, $tensor:ident, $scalar:ident, $in_place:ident, $scalar_in_place:ident) => {
        impl Tensor {
            #[doc = concat!("Elementwise `", stringify!($tensor), "` of two tensors of equal shape.")]
            ///
            /// # Errors
            /// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
            pub fn $tensor(&self, rhs: &Tensor) -> Result<Tensor, TensorError> {
                elementwise(self, rhs, BinaryOp::$op)
            }

            #[doc = concat!("Elementwise `", stringify!($tensor), "` of every element with `scalar`.")]
            pub fn $scalar(&self, scalar: f32) -> Tensor {
                elementwise_scalar(self, scalar, BinaryOp::$op)
            }

            #[doc = concat!("In-place `", stringify!($tensor), "`; the receiver is unchanged on error.")]
            ///
            /// # Errors
            /// Returns [`TensorError::ShapeMismatch`] if the shapes differ.
            pub fn $in_place(&mut self, rhs: &Tensor) -> Result<&mut Self, TensorError> {
                elementwise_in_place(self, rhs, BinaryOp::$op)?;
                Ok(self)
            }

            #[doc = concat!("In-place `", stringify!($tensor), "` with `scalar`.")]
            pub fn $scalar_in_place(&mut self, scalar: f32) -> &mut Self {
                elementwise_scalar_in_place(self, scalar, BinaryOp::$op);
                self
            }
        }
    };
}

tensor_arith!(Add, add, add_scalar, add_in_place, add_scalar_in_place);
tensor_arith!(Sub, sub, sub_scalar, sub_in_place, sub_scalar_in_place);
tensor_arith!(Mul, mul, mul_scalar, mul_in_place, mul_scalar_in_place);
tensor_arith!(Div, div, div_scalar, div_in_place, div_scalar_in_place);

// Operators are implemented on `&Tensor` only, so that `tensor.add(&other)`
// keeps resolving to the inherent method when `std::ops::Add` is in scope.
macro_rules! scalar_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:ident) => {
        impl $trait<f32> for &Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                elementwise_scalar(self, scalar, BinaryOp::$op)
            }
        }

        impl $assign_trait<f32> for Tensor {
            fn $assign_method(&mut self, scalar: f32) {
                elementwise_scalar_in_place(self, scalar, BinaryOp::$op);
            }
        }
    };
}

scalar_operator!(Add, add, AddAssign, add_assign, Add);
scalar_operator!(Sub, sub, SubAssign, sub_assign, Sub);
scalar_operator!(Mul, mul, MulAssign, mul_assign, Mul);
scalar_operator!(Div, div, DivAssign, div_assign, Div);
