// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # strided-tensor
//!
//! Dense, strided, n-dimensional `f32` tensors.
//!
//! This crate provides:
//! - [`Tensor`]: an owned, row-major tensor with value semantics.
//! - [`TensorView`]: a borrowed, possibly strided view over a tensor's buffer.
//! - [`Shape`] and [`Layout`]: dimension and stride bookkeeping.
//! - Elementwise arithmetic without broadcasting, transpose, reshape,
//!   squeeze / unsqueeze / permute, and batched matrix multiplication.
//! - [`TensorConfig`]: allocation limits and print settings, loadable from TOML.
//!
//! # Example
//! ```
//! use strided_tensor::Tensor;
//!
//! let a = Tensor::from_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let b = Tensor::from_vec([3, 2], vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
//! let c = a.matmul(&b).unwrap();
//! assert_eq!(c.shape().dims(), &[2, 2]);
//! assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
//! ```
//!
//! # Ownership
//! A [`Tensor`] never shares its buffer. Operations that only rearrange
//! strides ([`Tensor::permute`]) return a [`TensorView`], whose lifetime
//! ties it to the tensor it reads from.

mod config;
mod display;
mod error;
mod layout;
mod ops;
mod shape;
mod tensor;

pub use config::{TensorConfig, MAX_PRINT_PRECISION};
pub use display::TensorDisplay;
pub use error::TensorError;
pub use layout::{Layout, Offsets};
pub use ops::{
    elementwise, elementwise_in_place, elementwise_scalar, elementwise_scalar_in_place, matmul,
    transpose, BinaryOp,
};
pub use shape::Shape;
pub use tensor::{Tensor, TensorView};
