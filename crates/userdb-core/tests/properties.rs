use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use userdb_core::{
    config::DbConfig,
    query::AgeRange,
    service::{CreateReq, SearchAgeReq, SearchNameReq, StatusCode, UserService},
    user::User,
};

fn arb_user() -> impl Strategy<Value = User> {
    (
        "[a-e]{1,2}",
        -5i32..120,
        "[A-Za-z]{0,6}",
        "[A-Za-z]{0,6}",
    )
        .prop_map(|(key, age, first, last)| User::new(key, age, first, last))
}

fn arb_users() -> impl Strategy<Value = Vec<User>> {
    prop::collection::vec(arb_user(), 0..40)
}

fn load(users: &[User]) -> UserService {
    let service = UserService::new(DbConfig::default()).unwrap();
    for user in users {
        let resp = service.create(CreateReq { user: user.clone() }).unwrap();
        assert_eq!(resp.key, user.key);
    }
    service
}

/// Last write per key wins.
fn model(users: &[User]) -> BTreeMap<String, User> {
    users
        .iter()
        .map(|user| (user.key.clone(), user.clone()))
        .collect()
}

proptest! {
    #[test]
    fn list_matches_last_write_per_key(users in arb_users()) {
        let service = load(&users);

        let listed = service.list().unwrap().records;
        let expected: Vec<User> = model(&users).into_values().collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn list_is_idempotent(users in arb_users()) {
        let service = load(&users);

        prop_assert_eq!(service.list().unwrap(), service.list().unwrap());
    }

    #[test]
    fn generated_keys_are_distinct(count in 1usize..50) {
        let service = UserService::new(DbConfig::default()).unwrap();
        let mut keys = BTreeSet::new();
        for _ in 0..count {
            let resp = service
                .create(CreateReq { user: User::new("", 1, "A", "B") })
                .unwrap();
            prop_assert!(!resp.key.is_empty());
            keys.insert(resp.key);
        }

        prop_assert_eq!(keys.len(), count);
        prop_assert_eq!(service.list().unwrap().records.len(), count);
    }

    #[test]
    fn age_range_is_exact_and_ordered(
        users in arb_users(),
        a in -10i32..130,
        b in -10i32..130,
    ) {
        let (from, to_included) = (a.min(b), a.max(b));
        let service = load(&users);

        let resp = service
            .search_age(SearchAgeReq { age_range: Some(AgeRange::new(from, to_included)) })
            .unwrap();
        prop_assert_eq!(resp.status, StatusCode::Success);

        let mut expected: Vec<User> = model(&users)
            .into_values()
            .filter(|u| from <= u.age && u.age <= to_included)
            .collect();
        expected.sort_by_key(|u| u.age);

        let got_ages: Vec<i32> = resp.records.iter().map(|u| u.age).collect();
        let expected_ages: Vec<i32> = expected.iter().map(|u| u.age).collect();
        prop_assert_eq!(got_ages, expected_ages);

        let got: BTreeSet<&str> = resp.records.iter().map(|u| u.key.as_str()).collect();
        let want: BTreeSet<&str> = expected.iter().map(|u| u.key.as_str()).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn inverted_age_range_is_rejected(
        users in arb_users(),
        from in -10i32..130,
        gap in 1i32..20,
    ) {
        let service = load(&users);
        let before = service.list().unwrap();

        let resp = service
            .search_age(SearchAgeReq { age_range: Some(AgeRange::new(from, from - gap)) })
            .unwrap();
        prop_assert_eq!(resp.status, StatusCode::InvalidQuery);
        prop_assert!(resp.records.is_empty());
        prop_assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn name_search_is_substring_on_either_name(users in arb_users(), query in "[A-Za-z]{1,2}") {
        let service = load(&users);

        let resp = service
            .search_name(&SearchNameReq { query: query.clone() })
            .unwrap();
        let expected: Vec<User> = model(&users)
            .into_values()
            .filter(|u| u.first_name.contains(&query) || u.last_name.contains(&query))
            .collect();
        prop_assert_eq!(resp.records, expected);
    }
}
