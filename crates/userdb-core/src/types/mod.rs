mod key_supplier;

pub use key_supplier::*;
