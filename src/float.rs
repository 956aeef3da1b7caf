use std::fmt::{Debug, Display};

use num_traits::Float as NumFloat;

/// Marker trait for base floating-point types (`f32`, `f64`).
///
/// Bundles the numeric and utility traits both engines need. Only primitive
/// float types implement this; `Dual` and graph nodes do not.
pub trait Float: NumFloat + Copy + Default + Debug + Display + 'static {}

impl Float for f32 {}
impl Float for f64 {}
