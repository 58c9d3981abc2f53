use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rosterdsl::prelude::*;

use crate::common::{ages, seed_random, setup_db, setup_fixture, usernames};

#[test]
fn empty_condition_returns_every_member() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let found = repo.search(&MemberSearchCondition::new()).unwrap();
    assert_eq!(
        usernames(&found.results),
        [
            Some("member1"),
            Some("member2"),
            Some("member3"),
            Some("member4")
        ]
    );
    assert_eq!(found.total, None);
}

#[test]
fn age_lower_bound_is_inclusive() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let found = repo
        .search(&MemberSearchCondition::new().with_age_goe(30))
        .unwrap();
    assert_eq!(ages(&found.results), [30, 40]);
}

#[test]
fn combined_criteria() {
    let (conn, fixture) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let cond = MemberSearchCondition::new()
        .with_age_goe(35)
        .with_age_loe(40)
        .with_team_name("teamB");
    let found = repo.search(&cond).unwrap();

    assert_eq!(
        found.results,
        [MemberTeamDto {
            member_id: fixture.members[3].id,
            username: Some("member4".into()),
            age: 40,
            team_id: Some(fixture.team_b.id),
            team_name: Some("teamB".into()),
        }]
    );
}

#[test]
fn blank_username_is_the_same_as_absent() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let blank = repo
        .search(&MemberSearchCondition::new().with_username("   "))
        .unwrap();
    let absent = repo.search(&MemberSearchCondition::new()).unwrap();
    assert_eq!(blank, absent);
    assert_eq!(blank.results.len(), 4);
}

#[test]
fn username_and_team_name_match_exactly() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let found = repo
        .search(&MemberSearchCondition::new().with_username("member2"))
        .unwrap();
    assert_eq!(usernames(&found.results), [Some("member2")]);

    let found = repo
        .search(&MemberSearchCondition::new().with_team_name("teamA"))
        .unwrap();
    assert_eq!(usernames(&found.results), [Some("member1"), Some("member2")]);

    let found = repo
        .search(&MemberSearchCondition::new().with_team_name("teama"))
        .unwrap();
    assert!(found.results.is_empty());
}

#[test]
fn teamless_members_depend_on_the_join() {
    let (conn, _) = setup_fixture();
    let mut session = Session::new(&conn);
    session
        .persist_member(NewMember::new("member5", 50))
        .unwrap();

    let left = MemberRepository::new(&conn);
    let found = left.search(&MemberSearchCondition::new()).unwrap();
    assert_eq!(found.results.len(), 5);
    let loner = found.results.last().unwrap();
    assert_eq!(loner.username.as_deref(), Some("member5"));
    assert_eq!((loner.team_id, loner.team_name.as_deref()), (None, None));

    let inner = left
        .search_with(
            &MemberSearchCondition::new(),
            SearchOptions::new().join(JoinType::Inner),
        )
        .unwrap();
    assert_eq!(inner.results.len(), 4);

    let config = QueryConfig::from_toml_str(r#"join = "inner""#).unwrap();
    let configured = MemberRepository::with_config(&conn, config);
    assert_eq!(configured.count(&MemberSearchCondition::new()).unwrap(), 4);
    assert_eq!(left.count(&MemberSearchCondition::new()).unwrap(), 5);
}

#[test]
fn cross_join_search_is_rejected() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let err = repo
        .search_with(
            &MemberSearchCondition::new(),
            SearchOptions::new().join(JoinType::Cross),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn sort_descending_age_then_username_nulls_last() {
    let conn = setup_db();
    let mut session = Session::new(&conn);
    session.persist_member(NewMember::anonymous(100)).unwrap();
    session.persist_member(NewMember::new("member5", 100)).unwrap();
    session.persist_member(NewMember::new("member6", 100)).unwrap();
    session.persist_member(NewMember::new("member7", 10)).unwrap();

    let repo = MemberRepository::new(&conn);
    let options = SearchOptions::new()
        .order_by(desc(MEMBER.age))
        .order_by(asc(MEMBER.username).nulls_last());
    let found = repo
        .search_with(&MemberSearchCondition::new().with_age_goe(100), options)
        .unwrap();
    assert_eq!(
        usernames(&found.results),
        [Some("member5"), Some("member6"), None]
    );

    // Native placement puts NULL first when ascending.
    let found = repo
        .search_with(
            &MemberSearchCondition::new().with_age_goe(100),
            SearchOptions::new().order_by(asc(MEMBER.username)),
        )
        .unwrap();
    assert_eq!(
        usernames(&found.results),
        [None, Some("member5"), Some("member6")]
    );

    // A configured default applies to terms without their own placement.
    let config = QueryConfig::from_toml_str(r#"nulls = "last""#).unwrap();
    let found = MemberRepository::with_config(&conn, config)
        .search_with(
            &MemberSearchCondition::new().with_age_goe(100),
            SearchOptions::new().order_by(asc(MEMBER.username)),
        )
        .unwrap();
    assert_eq!(
        usernames(&found.results),
        [Some("member5"), Some("member6"), None]
    );
}

#[test]
fn every_subset_of_criteria_is_a_conjunction() {
    let conn = setup_db();
    let members = seed_random(&conn, 80, 42);
    let teams: HashMap<i64, String> = Executor::new(&conn)
        .fetch_as::<_, Team>(select(TEAM.columns()).from(TEAM.table))
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();

    let repo = MemberRepository::new(&conn);
    let mut rng = StdRng::seed_from_u64(7);
    let names = ["alice", "bob", "carol", "  ", "zed"];
    let team_names = ["teamA", "teamB", "teamC", ""];

    for mask in 0u8..16 {
        for _ in 0..4 {
            let mut cond = MemberSearchCondition::new();
            if mask & 1 != 0 {
                cond = cond.with_username(*names.choose(&mut rng).unwrap());
            }
            if mask & 2 != 0 {
                cond = cond.with_team_name(*team_names.choose(&mut rng).unwrap());
            }
            if mask & 4 != 0 {
                cond = cond.with_age_goe(rng.random_range(0..=60));
            }
            if mask & 8 != 0 {
                cond = cond.with_age_loe(rng.random_range(0..=60));
            }

            let expected: Vec<i64> = members
                .iter()
                .filter(|m| {
                    let username_ok = !has_text(cond.username.as_deref())
                        || m.username == cond.username;
                    let team_ok = !has_text(cond.team_name.as_deref())
                        || m.team_id.and_then(|id| teams.get(&id)) == cond.team_name.as_ref();
                    let goe_ok = cond.age_goe.is_none_or(|a| m.age >= a);
                    let loe_ok = cond.age_loe.is_none_or(|a| m.age <= a);
                    username_ok && team_ok && goe_ok && loe_ok
                })
                .map(|m| m.id)
                .collect();

            let found: Vec<i64> = repo
                .search(&cond)
                .unwrap()
                .results
                .iter()
                .map(|r| r.member_id)
                .collect();
            assert_eq!(found, expected, "condition: {cond:?}");
        }
    }
}
