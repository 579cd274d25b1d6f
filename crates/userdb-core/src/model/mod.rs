pub mod entity;
pub mod index;
