use crate::{
    config::DbConfig,
    db::Db,
    model::{entity::EntityModel, index::IndexModel},
    traits::EntityKind,
    value::Value,
};

///
/// Widget
/// Minimal two-index entity for engine tests.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Widget {
    pub(crate) id: String,
    pub(crate) rank: i64,
    pub(crate) label: String,
}

impl Widget {
    pub(crate) fn new(id: &str, rank: i64, label: &str) -> Self {
        Self {
            id: id.to_string(),
            rank,
            label: label.to_string(),
        }
    }
}

fn rank_value(widget: &Widget) -> Value {
    Value::Int(widget.rank)
}

fn label_value(widget: &Widget) -> Value {
    Value::Text(widget.label.clone())
}

static WIDGET_INDEXES: [IndexModel<Widget>; 2] = [
    IndexModel::new("rank", "rank", rank_value),
    IndexModel::new("label", "label", label_value),
];

static WIDGET_MODEL: EntityModel<Widget> = EntityModel {
    entity_name: "widget",
    primary_key: "id",
    indexes: &WIDGET_INDEXES,
};

impl EntityKind for Widget {
    const MODEL: &'static EntityModel<Self> = &WIDGET_MODEL;

    fn key(&self) -> &str {
        &self.id
    }
}

pub(crate) fn widget_db() -> Db<Widget> {
    Db::new(DbConfig::default()).expect("widget model is valid")
}

/// Open a write transaction, put every widget, commit.
pub(crate) fn seed(db: &Db<Widget>, widgets: impl IntoIterator<Item = Widget>) {
    let mut txn = db.begin_write().expect("writer slot");
    for widget in widgets {
        txn.put(widget).expect("put widget");
    }
    txn.commit();
}

pub(crate) fn ids<'a>(widgets: impl IntoIterator<Item = &'a Widget>) -> Vec<&'a str> {
    widgets.into_iter().map(|p| p.id.as_str()).collect()
}
