//! SeaORM table definitions and row types.

use sea_orm::EntityTrait;

pub mod admin;
pub mod user;

/// Column metadata shared by every soft-deletable account table.
pub trait AccountTable: EntityTrait {
    /// Primary key column
    const ID: Self::Column;
    /// Storage-assigned sequence column
    const ORDINAL: Self::Column;
    const CREATED_AT: Self::Column;
    const DELETED_AT: Self::Column;
    /// Columns returned by every read, matching the row struct
    const PROJECTION: &'static [Self::Column];
}
