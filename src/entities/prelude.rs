//! `SeaORM` Entity prelude

pub use super::notify::Entity as Notify;
pub use super::repair_completed::Entity as RepairCompleted;
pub use super::routes::Entity as Routes;
