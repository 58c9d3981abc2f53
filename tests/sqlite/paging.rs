use rosterdsl::prelude::*;

use crate::common::{seed_random, setup_db, setup_fixture, usernames};

#[test]
fn page_of_two_with_offset() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let found = repo
        .search_with(
            &MemberSearchCondition::new(),
            SearchOptions::new().page(Page::new(1, 2).unwrap()),
        )
        .unwrap();
    assert_eq!(usernames(&found.results), [Some("member2"), Some("member3")]);
    assert_eq!(found.total, Some(4));
}

#[test]
fn page_past_the_end_is_empty_but_counted() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let found = repo
        .search_with(
            &MemberSearchCondition::new().with_team_name("teamB"),
            SearchOptions::new().page(Page::new(10, 5).unwrap()),
        )
        .unwrap();
    assert!(found.results.is_empty());
    assert_eq!(found.total, Some(2));
}

#[test]
fn total_does_not_depend_on_the_window() {
    let conn = setup_db();
    seed_random(&conn, 57, 1234);
    let repo = MemberRepository::new(&conn);
    let cond = MemberSearchCondition::new().with_age_goe(20);

    let all = repo.search(&cond).unwrap().results;
    assert_eq!(repo.count(&cond).unwrap(), all.len() as u64);

    for limit in [1, 3, 7, 100] {
        let mut stitched = Vec::new();
        let mut offset = 0;
        loop {
            let page = repo
                .search_with(
                    &cond,
                    SearchOptions::new().page(Page::new(offset, limit).unwrap()),
                )
                .unwrap();
            assert_eq!(page.total, Some(all.len() as u64));
            assert!(page.results.len() <= limit as usize);
            if page.results.is_empty() {
                break;
            }
            offset += page.results.len() as i64;
            stitched.extend(page.results);
        }
        assert_eq!(stitched, all, "limit {limit}");
    }
}

#[test]
fn pages_over_tied_sort_keys_do_not_overlap() {
    let conn = setup_db();
    seed_random(&conn, 80, 99);
    let repo = MemberRepository::new(&conn);
    let cond = MemberSearchCondition::new();
    let by_age = || SearchOptions::new().order_by(desc(MEMBER.age));

    let all = repo.search_with(&cond, by_age()).unwrap().results;
    assert_eq!(all.len(), 80);
    for pair in all.windows(2) {
        assert!(pair[0].age >= pair[1].age);
        if pair[0].age == pair[1].age {
            assert!(pair[0].member_id < pair[1].member_id);
        }
    }

    for limit in [1, 4, 9] {
        let mut stitched = Vec::new();
        let mut offset = 0;
        loop {
            let page = repo
                .search_with(
                    &cond,
                    by_age().page(Page::new(offset, limit).unwrap()),
                )
                .unwrap();
            if page.results.is_empty() {
                break;
            }
            offset += page.results.len() as i64;
            stitched.extend(page.results);
        }
        assert_eq!(stitched, all, "limit {limit}");
    }
}

#[test]
fn invalid_windows_are_rejected_before_execution() {
    assert_eq!(Page::new(-1, 5).unwrap_err().kind(), ErrorKind::Validation);
    assert_eq!(Page::new(0, 0).unwrap_err().kind(), ErrorKind::Validation);

    let (conn, _) = setup_fixture();
    let config = QueryConfig {
        max_page_size: Some(10),
        ..QueryConfig::default()
    };
    let repo = MemberRepository::with_config(&conn, config);

    let err = repo
        .search_with(
            &MemberSearchCondition::new(),
            SearchOptions::new().page(Page::first(11).unwrap()),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let ok = repo
        .search_with(
            &MemberSearchCondition::new(),
            SearchOptions::new().page(Page::first(10).unwrap()),
        )
        .unwrap();
    assert_eq!(ok.results.len(), 4);
}

#[test]
fn executor_page_and_count_on_a_custom_query() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select_distinct([MEMBER.team_id])
        .from(MEMBER.table)
        .order_by([asc(MEMBER.team_id)])
        .page(Page::first(1).unwrap());
    let (rows, total) = executor.fetch_page(&query).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(total, 2);
}
