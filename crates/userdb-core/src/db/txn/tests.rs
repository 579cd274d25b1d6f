use crate::{
    config::{DbConfig, WriteMode},
    db::Db,
    error::{ErrorClass, ErrorOrigin},
    test_fixtures::{Widget, ids, widget_db, seed},
};
use std::{
    sync::{
        Arc, Barrier,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

#[test]
fn read_snapshot_is_fixed_at_open() {
    let db = widget_db();
    seed(&db, [Widget::new("a", 1, "x")]);

    let before = db.begin_read();
    seed(&db, [Widget::new("b", 2, "y")]);
    let after = db.begin_read();

    assert_eq!(ids(before.iter_all()), ["a"]);
    assert!(before.get("b").is_none());
    assert_eq!(ids(after.iter_all()), ["a", "b"]);
    assert_eq!(before.version(), 1);
    assert_eq!(after.version(), 2);
}

#[test]
fn uncommitted_writes_are_invisible_to_readers() {
    let db = widget_db();

    let mut writer = db.begin_write().unwrap();
    writer.put(Widget::new("a", 1, "x")).unwrap();

    // Read-your-writes inside the writer only.
    assert_eq!(writer.get("a"), Some(&Widget::new("a", 1, "x")));
    assert!(db.begin_read().is_empty());

    writer.commit();
    assert_eq!(db.begin_read().len(), 1);
}

#[test]
fn dropped_writer_leaves_no_trace() {
    let db = widget_db();
    seed(&db, [Widget::new("a", 1, "x")]);

    {
        let mut writer = db.begin_write().unwrap();
        writer.put(Widget::new("b", 2, "y")).unwrap();
        writer.delete("a").unwrap();
    }

    let txn = db.begin_read();
    assert_eq!(ids(txn.iter_all()), ["a"]);
    assert_eq!(db.version(), 1);
}

#[test]
fn released_writer_leaves_no_trace() {
    let db = widget_db();

    let mut writer = db.begin_write().unwrap();
    writer.put(Widget::new("a", 1, "x")).unwrap();
    writer.release();

    assert!(db.begin_read().is_empty());
    assert_eq!(db.version(), 0);

    // The slot is free again.
    db.begin_write().unwrap().commit();
}

#[test]
fn commit_advances_version_only_when_dirty() {
    let db = widget_db();

    assert_eq!(db.begin_write().unwrap().commit(), 0);

    let mut writer = db.begin_write().unwrap();
    writer.put(Widget::new("a", 1, "x")).unwrap();
    assert_eq!(writer.commit(), 1);

    let mut writer = db.begin_write().unwrap();
    assert!(writer.delete("missing").unwrap().is_none());
    assert_eq!(writer.commit(), 1);
    assert_eq!(db.version(), 1);
}

#[test]
fn fail_fast_rejects_second_writer() {
    let db: Db<Widget> =
        Db::new(DbConfig::default().with_write_mode(WriteMode::FailFast)).unwrap();

    let first = db.begin_write().unwrap();
    let Err(err) = db.begin_write() else {
        panic!("second writer should be rejected");
    };
    assert_eq!(err.class, ErrorClass::Conflict);
    assert_eq!(err.origin, ErrorOrigin::Transaction);
    assert!(err.is_conflict());

    // Readers are unaffected by the open writer.
    assert!(db.begin_read().is_empty());

    first.release();
    db.begin_write().unwrap().commit();
    assert_eq!(db.metrics_report().counters.ops.writer_busy, 1);
}

#[test]
fn blocking_writer_waits_for_slot() {
    let db = Arc::new(widget_db());
    let first = db.begin_write().unwrap();

    let started = Arc::new(Barrier::new(2));
    let acquired = Arc::new(AtomicBool::new(false));
    let (done_tx, done_rx) = mpsc::channel();

    let handle = {
        let db = Arc::clone(&db);
        let started = Arc::clone(&started);
        let acquired = Arc::clone(&acquired);
        thread::spawn(move || {
            started.wait();
            let mut writer = db.begin_write().unwrap();
            acquired.store(true, Ordering::SeqCst);
            writer.put(Widget::new("late", 9, "z")).unwrap();
            done_tx.send(writer.commit()).unwrap();
        })
    };

    started.wait();
    thread::sleep(Duration::from_millis(50));
    assert!(!acquired.load(Ordering::SeqCst));

    let mut first = first;
    first.put(Widget::new("early", 1, "a")).unwrap();
    assert_eq!(first.commit(), 1);

    assert_eq!(done_rx.recv().unwrap(), 2);
    handle.join().unwrap();

    assert_eq!(ids(db.begin_read().iter_all()), ["early", "late"]);
}

#[test]
fn readers_are_isolated_from_concurrent_commits() {
    let db = Arc::new(widget_db());
    seed(&db, (0..10).map(|i| Widget::new(&format!("k{i:02}"), i, "x")));

    let opened = Arc::new(Barrier::new(2));
    let committed = Arc::new(Barrier::new(2));

    let reader = {
        let db = Arc::clone(&db);
        let opened = Arc::clone(&opened);
        let committed = Arc::clone(&committed);
        thread::spawn(move || {
            let txn = db.begin_read();
            opened.wait();
            committed.wait();

            // The writer has committed by now; this view must not move.
            (txn.len(), txn.get("new").is_none(), txn.version())
        })
    };

    opened.wait();
    seed(&db, [Widget::new("new", 5, "y")]);
    committed.wait();

    let (len, missing_new, version) = reader.join().unwrap();
    assert_eq!(len, 10);
    assert!(missing_new);
    assert_eq!(version, 1);
    assert_eq!(db.begin_read().len(), 11);
}

#[test]
fn transactions_are_counted() {
    let db = widget_db();
    seed(&db, [Widget::new("a", 1, "x"), Widget::new("a", 2, "x")]);
    db.begin_read().release();
    drop(db.begin_write().unwrap());

    let ops = db.metrics_report().counters.ops;
    assert_eq!(ops.write_txns, 2);
    assert_eq!(ops.read_txns, 1);
    assert_eq!(ops.commits, 1);
    assert_eq!(ops.releases, 2);
    assert_eq!(ops.index_inserts, 4);
    assert_eq!(ops.index_removes, 2);
    assert_eq!(ops.last_version, 1);
}
