// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Human-readable printing of tensors.

use crate::{Tensor, TensorConfig};
use std::fmt;

/// Formats a [`Tensor`] with explicit [`TensorConfig`] settings.
///
/// Obtained through [`Tensor::display`].
#[derive(Debug)]
pub struct TensorDisplay<'a> {
    tensor: &'a Tensor,
    precision: usize,
    threshold: usize,
}

impl Tensor {
    /// Returns a formatter that honours `config`'s precision and threshold.
    ///
    /// # Examples
    /// ```
    /// use strided_tensor::{Tensor, TensorConfig};
    /// let t = Tensor::from_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let config = TensorConfig { print_precision: 1, ..Default::default() };
    /// assert_eq!(t.display(&config).to_string(), "[[1.0, 2.0], [3.0, 4.0]]");
    /// ```
    pub fn display(&self, config: &TensorConfig) -> TensorDisplay<'_> {
        TensorDisplay {
            tensor: self,
            precision: config.print_precision,
            threshold: config.print_threshold,
        }
    }
}

impl fmt::Display for TensorDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.tensor;
        if t.numel() > self.threshold {
            return write!(f, "Tensor(shape={}, numel={})", t.shape(), t.numel());
        }
        if t.ndim() == 0 {
            return write!(f, "[]");
        }
        write_nested(f, t.data(), t.shape().dims(), self.precision)
    }
}

fn write_nested(
    f: &mut fmt::Formatter<'_>,
    data: &[f32],
    dims: &[usize],
    precision: usize,
) -> fmt::Result {
    write!(f, "[")?;
    if dims.len() == 1 {
        for (i, x) in data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x:.precision$}")?;
        }
    } else {
        let chunk = data.len() / dims[0];
        for (i, block) in data.chunks(chunk).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_nested(f, block, &dims[1..], precision)?;
        }
    }
    write!(f, "]")
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(&TensorConfig::default()), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_vector() {
        let t = Tensor::from_f32([3], &[1.0, 2.5, -3.0]).unwrap();
        assert_eq!(t.to_string(), "[1.0000, 2.5000, -3.0000]");
    }

    #[test]
    fn test_display_batched() {
        let t = Tensor::from_vec([2, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let config = TensorConfig {
            print_precision: 0,
            ..Default::default()
        };
        assert_eq!(t.display(&config).to_string(), "[[[1, 2]], [[3, 4]]]");
    }

    #[test]
    fn test_display_summary_over_threshold() {
        let t = Tensor::zeros([4, 4]).unwrap();
        let config = TensorConfig {
            print_threshold: 8,
            ..Default::default()
        };
        assert_eq!(
            t.display(&config).to_string(),
            "Tensor(shape=[4, 4], numel=16)"
        );
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(Tensor::default().to_string(), "[]");
    }
}
