use crate::model::entity::EntityModel;

///
/// EntityKind
///
/// A record type the store can hold: cloneable, shareable across worker
/// threads, and described by a static model.
///

pub trait EntityKind: Clone + Send + Sync + 'static {
    const MODEL: &'static EntityModel<Self>;

    /// Primary key; at most one live record per key.
    fn key(&self) -> &str;
}
