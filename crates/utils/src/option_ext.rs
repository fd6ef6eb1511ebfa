use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Display the contained value, or "none"
    ///
    /// Generic over anything that implements `Display`. Handy for optional
    /// sub-views such as crop windows that are frequently absent.
    ///
    /// ```rust
    /// # use voxtools_utils::OptionExt;
    /// let x: Option<u32> = Some(2);
    /// assert_eq!(x.display(), "2");
    ///
    /// let x: Option<u32> = None;
    /// assert_eq!(x.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        self.as_ref()
            .map(|value| f!("{value}"))
            .unwrap_or_else(|| "none".to_string())
    }
}
