//! Value types shared by the formshape crates.
//!
//! - [`WireValue`] / [`FormPayload`]: raw values as a form submission delivers them
//! - [`TypedValue`]: values after coercion, including the invalid sentinels
//! - [`DisplayValue`]: values formatted back for a form control

/// Raw form submission values.
pub mod wire;

/// Coerced values and their display form.
pub mod typed;

/// `Number(..)` / `String(number)` compatible conversions.
pub mod number;

/// Naive calendar dates.
pub mod date;

pub use date::DateValue;
pub use typed::{DisplayValue, TypedValue};
pub use wire::{FileLike, FormPayload, WireValue};
