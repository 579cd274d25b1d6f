mod key;
mod store;


pub use key::IndexKey;
pub use store::{IndexRange, IndexStore};
