pub mod amount;
pub mod row;

pub use amount::{ScalePrecision, ScaledAmount};
pub use row::{Field, FieldRow, Row};
