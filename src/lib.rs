#[cfg(test)]
#[macro_use]
extern crate lazy_static;

#[cfg(test)]
mod tests;

pub mod bstree;

pub mod error;

pub mod map;

pub mod set;

pub mod vector;

pub use bstree::{BSTree, Position};
pub use error::{Error, Result};
pub use map::Map;
pub use set::Set;
pub use vector::Vector;

/// Projection of a stored value onto the key that orders it inside a `BSTree`.
/// Two values with equal keys are considered equivalent by the tree, whatever
/// else they carry
pub trait Keyed {
    type Key: Ord + ?Sized;

    fn key(&self) -> &Self::Key;
}

macro_rules! keyed_by_self {
    ($($t:ty),* $(,)?) => {
        $(
            impl Keyed for $t {
                type Key = $t;

                fn key(&self) -> &$t {
                    self
                }
            }
        )*
    };
}

keyed_by_self!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool, String,
);

impl<'a> Keyed for &'a str {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

#[cfg(feature = "ordered-float")]
mod float_keys {
    use super::Keyed;
    use ordered_float::{NotNan, OrderedFloat};

    keyed_by_self!(OrderedFloat<f32>, OrderedFloat<f64>, NotNan<f32>, NotNan<f64>);
}
