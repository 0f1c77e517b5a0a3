//! Sparse-override default merging for parameter records.
//!
//! A sparse record leaves unset fields at their type's zero value. Merging it
//! with a fully populated defaults record of the same type replaces each zero
//! field with the default and keeps every other field.
//!
//! A plain field set to its zero value on purpose (for example `cpucores: 0`)
//! is indistinguishable from an unset one and will be replaced. Declare the
//! field as `Option<T>` to track presence explicitly: only `None` counts as
//! unset, so `Some(0)` survives the merge.
//!
//! ```
//! use glesys_core::impl_with_defaults;
//! use glesys_core::merge::with_defaults;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Params {
//!     cpu: u32,
//!     hostname: String,
//! }
//!
//! impl_with_defaults!(Params { cpu, hostname });
//!
//! let sparse = Params { cpu: 0, hostname: "custom".into() };
//! let defaults = Params { cpu: 2, hostname: "generated".into() };
//! assert_eq!(
//!     with_defaults(&sparse, &defaults),
//!     Params { cpu: 2, hostname: "custom".into() }
//! );
//! ```

use std::collections::{BTreeMap, HashMap};

/// Types with a distinguished "unset" value.
pub trait ZeroValue {
    /// Returns true if `self` is the zero value of its type.
    fn is_zero(&self) -> bool;
}

macro_rules! zero_by_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ZeroValue for $ty {
                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

zero_by_default!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool);

impl ZeroValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ZeroValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ZeroValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ZeroValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<K, V, S> ZeroValue for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> ZeroValue for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ZeroValue for serde_json::Value {
    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl<T: ZeroValue + ?Sized> ZeroValue for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

/// The per-field rule: `default` if `value` is zero, otherwise `value`.
#[must_use]
pub fn or_default<T>(value: &T, default: &T) -> T
where
    T: ZeroValue + Clone,
{
    if value.is_zero() {
        default.clone()
    } else {
        value.clone()
    }
}

/// Flat records that can be completed from a defaults record.
///
/// Implement with [`impl_with_defaults!`](crate::impl_with_defaults).
pub trait WithDefaults: Sized {
    /// Return a new record taking each zero field from `defaults`.
    #[must_use]
    fn with_defaults_from(&self, defaults: &Self) -> Self;
}

/// Merge `sparse` with `defaults` without touching either.
#[must_use]
pub fn with_defaults<T: WithDefaults>(sparse: &T, defaults: &T) -> T {
    sparse.with_defaults_from(defaults)
}

/// Implement [`WithDefaults`] for a struct by listing every field.
///
/// Each field type must implement [`ZeroValue`] and `Clone`. Leaving a
/// field out is a compile error.
#[macro_export]
macro_rules! impl_with_defaults {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::merge::WithDefaults for $ty {
            fn with_defaults_from(&self, defaults: &Self) -> Self {
                Self {
                    $($field: $crate::merge::or_default(&self.$field, &defaults.$field)),+
                }
            }
        }
    };
}
