// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor operations.
//!
//! Each operation is a free function over tensors or views, with a method
//! of the same name on [`crate::Tensor`] that forwards to it. All of them
//! run eagerly on the calling thread.

mod elementwise_op;
mod matmul_op;
mod reshape_op;
mod transpose_op;

pub use elementwise_op::{
    elementwise, elementwise_in_place, elementwise_scalar, elementwise_scalar_in_place, BinaryOp,
};
pub use matmul_op::matmul;
pub use transpose_op::transpose;
