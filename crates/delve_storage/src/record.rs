//! Traits shared by every stored record and view.

use std::fmt;

use chrono::{DateTime, Utc};
use delve_foundation::RecordId;

/// Row locking mode for reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lock {
    /// Plain read.
    #[default]
    None,
    /// Lock the rows read until the transaction ends.
    ForUpdate,
}

/// A persistent record with a typed identifier and timestamps.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Identifier type.
    type Id: RecordId + Send + Sync + 'static;
    /// Filter accepted by `get_many`.
    type Filter: Filter<Self>;

    /// Human readable record kind, used in errors and logs.
    const KIND: &'static str;

    /// Append-only records reject updates.
    const APPEND_ONLY: bool = false;

    /// Returns the record's identifier.
    fn id(&self) -> Self::Id;

    /// Assigns the record's identifier.
    fn set_id(&mut self, id: Self::Id);

    /// Sets the creation timestamp.
    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// Sets the last-update timestamp. A no-op for append-only records.
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// A predicate over records of one kind.
pub trait Filter<R>: Default + fmt::Debug {
    /// Returns true if the record passes this filter.
    fn matches(&self, record: &R) -> bool;
}

/// A read-only projection joining an instance with its template.
pub trait View: Clone + fmt::Debug {
    /// Identifier type (shared with the underlying instance).
    type Id: RecordId;
    /// Filter accepted by `get_views`.
    type Filter: Filter<Self>;

    /// Human readable view kind.
    const KIND: &'static str;

    /// Returns the view's identifier.
    fn id(&self) -> Self::Id;
}

/// Returns true if `wanted` is unset or equal to `actual`.
pub(crate) fn field_matches<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|w| w == actual)
}

/// Returns true if `wanted` is unset or equal to the optional `actual`.
pub(crate) fn optional_field_matches<T: PartialEq>(wanted: Option<&T>, actual: Option<&T>) -> bool {
    wanted.is_none_or(|w| actual == Some(w))
}

/// Implements [`Record`] for a struct with `id`, `created_at` and `updated_at` fields.
macro_rules! impl_record {
    (append_only $ty:ty, $id:ty, $filter:ty, $kind:literal) => {
        impl $crate::record::Record for $ty {
            type Id = $id;
            type Filter = $filter;

            const KIND: &'static str = $kind;
            const APPEND_ONLY: bool = true;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }

            fn set_created_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.created_at = at;
            }

            fn set_updated_at(&mut self, _at: chrono::DateTime<chrono::Utc>) {}
        }
    };
    ($ty:ty, $id:ty, $filter:ty, $kind:literal) => {
        impl $crate::record::Record for $ty {
            type Id = $id;
            type Filter = $filter;

            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }

            fn set_created_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.created_at = at;
            }

            fn set_updated_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

pub(crate) use impl_record;
