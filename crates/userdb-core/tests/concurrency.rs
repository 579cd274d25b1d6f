use std::{
    sync::{Arc, Barrier},
    thread,
};
use userdb_core::{
    config::{DbConfig, WriteMode},
    query::AgeRange,
    service::{CreateReq, SearchAgeReq, StatusCode, UserService},
    user::User,
};

const WRITERS: usize = 4;
const PER_WRITER: usize = 50;

#[test]
fn concurrent_creates_all_land() {
    let service = Arc::new(UserService::new(DbConfig::default()).unwrap());
    let start = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let service = Arc::clone(&service);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for i in 0..PER_WRITER {
                    let age = i32::try_from(i).unwrap();
                    let resp = service
                        .create(CreateReq {
                            user: User::new(format!("w{w}-{i:03}"), age, "T", "U"),
                        })
                        .unwrap();
                    assert_eq!(resp.status, StatusCode::Success);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.list().unwrap().records.len(), WRITERS * PER_WRITER);
    assert_eq!(
        service.db().version(),
        u64::try_from(WRITERS * PER_WRITER).unwrap()
    );
}

#[test]
fn readers_see_whole_commits_only() {
    let service = Arc::new(UserService::new(DbConfig::default()).unwrap());

    // Each commit moves one user across the 0..=9 / 10..=19 boundary, and
    // puts a second user on the other side, so a consistent view always has
    // exactly as many users in each half.
    let writer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for i in 0..200 {
                let (low, high) = if i % 2 == 0 { (5, 15) } else { (15, 5) };
                let mut txn = service.db().begin_write().unwrap();
                txn.put(User::new("a", low, "A", "A")).unwrap();
                txn.put(User::new("b", high, "B", "B")).unwrap();
                txn.commit();
            }
        })
    };

    let reader = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for _ in 0..200 {
                let txn = service.db().begin_read();
                let low = txn
                    .iter_all()
                    .filter(|u| AgeRange::new(0, 9).contains(u.age))
                    .count();
                let high = txn.len() - low;
                assert!(txn.is_empty() || low == high, "torn view: {low} vs {high}");
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    let resp = service
        .search_age(SearchAgeReq {
            age_range: Some(AgeRange::new(0, 100)),
        })
        .unwrap();
    assert_eq!(resp.records.len(), 2);
}

#[test]
fn fail_fast_surfaces_conflict_as_error() {
    let service = UserService::new(DbConfig::default().with_write_mode(WriteMode::FailFast)).unwrap();

    let held = service.db().begin_write().unwrap();
    let err = service
        .create(CreateReq {
            user: User::new("k", 1, "A", "B"),
        })
        .unwrap_err();
    assert!(err.is_conflict());

    held.release();
    service
        .create(CreateReq {
            user: User::new("k", 1, "A", "B"),
        })
        .unwrap();
    assert_eq!(service.list().unwrap().records.len(), 1);
}
