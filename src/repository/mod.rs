pub mod collection;
pub mod store;

pub use collection::CategorizedCollection;
pub use store::EntityStore;
