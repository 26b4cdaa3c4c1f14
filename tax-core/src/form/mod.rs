//! Conversion between a [`Profile`](crate::models::Profile) and the flat set
//! of named inputs a wizard form presents.

mod codec;
pub mod fields;
mod widgets;

pub use codec::{extract, populate};
pub use fields::{FIELDS, FieldKind, FieldSpec, FieldValue, field, fields_for_step};
pub use widgets::{FormError, FormFields, WidgetValue};
