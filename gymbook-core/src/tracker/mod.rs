//! The application-wide aggregator.
//!
//! `Tracker` owns one store per entity type and is the only thing the front
//! end talks to. Operations that span stores (instantiating templates,
//! cascading deletes, activating plans) live here; everything else is a
//! straight delegation to the owning store.

mod body;
mod export;
mod reminders;
mod supplements;
#[allow(clippy::module_inception)]
mod tracker;
mod workouts;

pub use export::{EXPORT_VERSION, ExportBundle};
pub use tracker::Tracker;

/// Generates the read accessor and plain add/update/delete delegations for
/// a store that needs no cross-store bookkeeping.
macro_rules! delegate_crud {
    ($field:ident: $ty:ty, $add:ident, $update:ident, $delete:ident) => {
        pub fn $field(&self) -> &$crate::store::EntityStore<$ty> {
            &self.$field
        }

        pub fn $add(&mut self, record: $ty) -> String {
            self.$field.add(record)
        }

        pub fn $update(&mut self, record: $ty) -> bool {
            self.$field.update(record)
        }

        pub fn $delete(&mut self, id: &str) -> bool {
            self.$field.delete(id)
        }
    };
}

pub(crate) use delegate_crud;
