use crate::f;

/// Extends the `[T; 3]` triplets used for shapes, spacings, and coordinates
pub trait TripletExt<T> {
    /// Product of all three components, `None` on overflow
    ///
    /// ```rust
    /// # use voxtools_utils::TripletExt;
    /// assert_eq!([2usize, 3, 5].checked_product(), Some(30));
    /// assert_eq!([usize::MAX, 2, 1].checked_product(), None);
    /// ```
    fn checked_product(&self) -> Option<T>;

    /// Compact `AxBxC` representation
    ///
    /// ```rust
    /// # use voxtools_utils::TripletExt;
    /// assert_eq!([2usize, 3, 5].dims(), "2x3x5");
    /// ```
    fn dims(&self) -> String;
}

impl TripletExt<usize> for [usize; 3] {
    fn checked_product(&self) -> Option<usize> {
        self.iter()
            .try_fold(1usize, |acc, extent| acc.checked_mul(*extent))
    }

    fn dims(&self) -> String {
        f!("{}x{}x{}", self[0], self[1], self[2])
    }
}

impl TripletExt<f64> for [f64; 3] {
    fn checked_product(&self) -> Option<f64> {
        let product = self[0] * self[1] * self[2];
        product.is_finite().then_some(product)
    }

    fn dims(&self) -> String {
        f!("{}x{}x{}", self[0], self[1], self[2])
    }
}
