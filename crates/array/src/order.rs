//! Flattening conventions between coordinates and linear offsets

use serde::{Deserialize, Serialize};

/// Linear buffer flattening convention
///
/// Determines which axis varies fastest when walking the buffer.
///
/// | Order         | Fastest | Flat index for (c0, c1, c2)       |
/// | ------------- | ------- | --------------------------------- |
/// | `RowMajor`    | first   | `c0 + s0*c1 + s0*s1*c2`           |
/// | `ColumnMajor` | last    | `c2 + s2*c1 + s2*s1*c0`           |
///
/// Freshly zero-initialised buffers default to `ColumnMajor`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// First axis varies fastest
    RowMajor,
    /// Last axis varies fastest
    #[default]
    ColumnMajor,
}

impl Order {
    /// Flatten coordinates into a linear offset, without bounds checks
    ///
    /// Stride products accumulate left-to-right for `RowMajor` and
    /// right-to-left for `ColumnMajor`, over however many coordinates are
    /// given. Fewer than three coordinates therefore produce a partial index
    /// over the leading extents, not a lookup on a lower rank grid.
    ///
    /// Arithmetic wraps, so out of range coordinates give a meaningless offset
    /// rather than a panic. Use [Order::checked_flatten()] for untrusted input.
    ///
    /// ```rust
    /// # use voxtools_array::Order;
    /// let shape = [2, 3, 5];
    /// assert_eq!(Order::RowMajor.flatten(&[1, 2, 4], &shape), 29);
    /// assert_eq!(Order::ColumnMajor.flatten(&[1, 2, 4], &shape), 29);
    ///
    /// // partial indices
    /// assert_eq!(Order::RowMajor.flatten(&[1, 2], &shape), 5);
    /// assert_eq!(Order::ColumnMajor.flatten(&[1, 2], &shape), 5);
    /// assert_eq!(Order::ColumnMajor.flatten(&[7], &shape), 7);
    /// ```
    pub fn flatten(&self, coords: &[usize], shape: &[usize]) -> usize {
        let n = coords.len().min(shape.len());
        let pairs = coords[..n].iter().zip(&shape[..n]);

        let accumulate = |(index, stride): (usize, usize), (c, s): (&usize, &usize)| {
            (index.wrapping_add(c.wrapping_mul(stride)), stride.wrapping_mul(*s))
        };

        match self {
            Order::RowMajor => pairs.fold((0, 1), accumulate).0,
            Order::ColumnMajor => pairs.rev().fold((0, 1), accumulate).0,
        }
    }

    /// Flatten coordinates into a linear offset, `None` on overflow
    ///
    /// Same convention as [Order::flatten()], but also `None` when no
    /// coordinates are given or there are more coordinates than extents.
    ///
    /// ```rust
    /// # use voxtools_array::Order;
    /// let shape = [2, 3, 5];
    /// assert_eq!(Order::RowMajor.checked_flatten(&[1, 2], &shape), Some(5));
    /// assert_eq!(Order::RowMajor.checked_flatten(&[usize::MAX, 1], &shape), None);
    /// assert_eq!(Order::RowMajor.checked_flatten(&[0, 0, 0, 1], &shape), None);
    /// ```
    pub fn checked_flatten(&self, coords: &[usize], shape: &[usize]) -> Option<usize> {
        if coords.is_empty() || coords.len() > shape.len() {
            return None;
        }
        let pairs = coords.iter().zip(shape);

        let accumulate = |acc: Option<(usize, usize)>, (c, s): (&usize, &usize)| {
            let (index, stride) = acc?;
            Some((index.checked_add(c.checked_mul(stride)?)?, stride.checked_mul(*s)?))
        };

        let flat = match self {
            Order::RowMajor => pairs.fold(Some((0, 1)), accumulate),
            Order::ColumnMajor => pairs.rev().fold(Some((0, 1)), accumulate),
        };
        flat.map(|(index, _)| index)
    }

    /// Recover the three coordinates of a linear offset, without bounds checks
    ///
    /// The exact inverse of [Order::flatten()] for in-range values.
    ///
    /// ```rust
    /// # use voxtools_array::Order;
    /// let shape = [2, 3, 5];
    /// assert_eq!(Order::RowMajor.unflatten(29, &shape), [1, 2, 4]);
    /// assert_eq!(Order::ColumnMajor.unflatten(29, &shape), [1, 2, 4]);
    /// ```
    pub fn unflatten(&self, index: usize, shape: &[usize; 3]) -> [usize; 3] {
        match self {
            Order::RowMajor => {
                let rest = index / shape[0];
                [index % shape[0], rest % shape[1], rest / shape[1]]
            }
            Order::ColumnMajor => {
                let rest = index / shape[2];
                [rest / shape[1], rest % shape[1], index % shape[2]]
            }
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Order::RowMajor => write!(f, "row-major"),
            Order::ColumnMajor => write!(f, "column-major"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_first_axis_fastest() {
        let shape = [2, 3, 5];
        assert_eq!(Order::RowMajor.flatten(&[1, 0, 0], &shape), 1);
        assert_eq!(Order::RowMajor.flatten(&[0, 1, 0], &shape), 2);
        assert_eq!(Order::RowMajor.flatten(&[0, 0, 1], &shape), 6);
    }

    #[test]
    fn column_major_last_axis_fastest() {
        let shape = [2, 3, 5];
        assert_eq!(Order::ColumnMajor.flatten(&[0, 0, 1], &shape), 1);
        assert_eq!(Order::ColumnMajor.flatten(&[0, 1, 0], &shape), 5);
        assert_eq!(Order::ColumnMajor.flatten(&[1, 0, 0], &shape), 15);
    }

    #[test]
    fn partial_column_major_uses_trailing_stride_of_given_coordinates() {
        // two coordinates flatten as c1 + s1*c0
        assert_eq!(Order::ColumnMajor.flatten(&[2, 1], &[4, 3, 9]), 7);
    }

    #[test]
    fn checked_flatten_refuses_overflow_and_bad_rank() {
        let shape = [2, 3, 5];
        for order in [Order::RowMajor, Order::ColumnMajor] {
            assert_eq!(order.checked_flatten(&[1, 2, 4], &shape), Some(29));
            assert_eq!(order.checked_flatten(&[usize::MAX, 1], &shape), None);
            assert_eq!(order.checked_flatten(&[1, usize::MAX], &shape), None);
            assert_eq!(order.checked_flatten(&[], &shape), None);
            assert_eq!(order.checked_flatten(&[0, 0, 0, 1], &shape), None);
        }
        assert_eq!(Order::ColumnMajor.checked_flatten(&[2, 1], &[4, 3, 9]), Some(7));
    }

    #[test]
    fn unchecked_flatten_wraps_instead_of_panicking() {
        let shape = [2, 3, 5];
        let _ = Order::RowMajor.flatten(&[usize::MAX, usize::MAX, usize::MAX], &shape);
        let _ = Order::ColumnMajor.flatten(&[usize::MAX, usize::MAX, usize::MAX], &shape);
    }

    #[test]
    fn every_offset_round_trips() {
        let shape = [3, 4, 2];
        for order in [Order::RowMajor, Order::ColumnMajor] {
            for index in 0..24 {
                let coords = order.unflatten(index, &shape);
                assert_eq!(order.flatten(&coords, &shape), index);
            }
        }
    }
}
