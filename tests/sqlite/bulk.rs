use rosterdsl::prelude::*;

use crate::common::setup_fixture;

fn all_members(executor: &Executor<'_>) -> Vec<Member> {
    executor
        .fetch_as(
            select(MEMBER.columns())
                .from(MEMBER.table)
                .order_by([asc(MEMBER.id)]),
        )
        .unwrap()
}

#[test]
fn update_renames_young_members() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let affected = repo
        .bulk_update(
            lt(MEMBER.age, 28),
            [(MEMBER.username, Assignment::Literal("guest".into()))],
        )
        .unwrap();
    assert_eq!(affected, 2);

    let names: Vec<Option<String>> = all_members(&Executor::new(&conn))
        .into_iter()
        .map(|m| m.username)
        .collect();
    assert_eq!(
        names,
        [
            Some("guest".to_owned()),
            Some("guest".to_owned()),
            Some("member3".to_owned()),
            Some("member4".to_owned()),
        ]
    );
}

#[test]
fn increment_every_age() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let affected = repo
        .bulk_update(Predicate::Always, [(MEMBER.age, Assignment::Increment(1))])
        .unwrap();
    assert_eq!(affected, 4);

    let ages: Vec<i64> = all_members(&Executor::new(&conn))
        .iter()
        .map(|m| m.age)
        .collect();
    assert_eq!(ages, [11, 21, 31, 41]);
}

#[test]
fn expression_assignment() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let update = BulkUpdate::new(MEMBER.table)
        .set_expr(MEMBER.username, concat(MEMBER.username, "!"))
        .set_expr(MEMBER.age, sub(MEMBER.age, 5))
        .filter(eq(MEMBER.team_id, select([TEAM.id]).from(TEAM.table).filter(eq(TEAM.name, "teamB"))));
    assert_eq!(update.execute(&executor).unwrap(), 2);

    let members = all_members(&executor);
    assert_eq!(members[2].username.as_deref(), Some("member3!"));
    assert_eq!(members[3].age, 35);
    assert_eq!(members[0].age, 10);
}

#[test]
fn delete_older_members() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    assert_eq!(repo.bulk_delete(gt(MEMBER.age, 18)).unwrap(), 3);
    let remaining = all_members(&Executor::new(&conn));
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].username.as_deref(), Some("member1"));

    assert_eq!(repo.bulk_delete(gt(MEMBER.age, 18)).unwrap(), 0);
}

#[test]
fn update_without_assignments_is_rejected() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let err = repo
        .bulk_update(Predicate::Always, Vec::<(Column, Assignment<'_>)>::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = repo
        .bulk_update(
            Predicate::Always,
            [(TEAM.name, Assignment::Literal("teamZ".into()))],
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn single_row_reads() {
    let (conn, fixture) = setup_fixture();
    let executor = Executor::new(&conn);
    let repo = MemberRepository::new(&conn);

    let all = select(MEMBER.columns()).from(MEMBER.table);
    assert!(matches!(
        executor.fetch_one(&all).unwrap_err(),
        RosterError::TooManyResults(4)
    ));

    let none = select(MEMBER.columns())
        .from(MEMBER.table)
        .filter(eq(MEMBER.age, 99));
    assert_eq!(
        executor.fetch_one(&none).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(executor.fetch_optional(&none).unwrap(), None);

    assert_eq!(
        repo.find_by_username("member3").unwrap(),
        Some(fixture.members[2].clone())
    );
    assert_eq!(repo.find_by_username("nobody").unwrap(), None);

    let oldest: i64 = executor
        .fetch_scalar(select([max(MEMBER.age)]).from(MEMBER.table))
        .unwrap();
    assert_eq!(oldest, 40);
}

#[test]
fn store_failures_surface_as_store_errors() {
    let conn = ::rusqlite::Connection::open_in_memory().unwrap();
    let repo = MemberRepository::new(&conn);

    let err = repo.search(&MemberSearchCondition::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(matches!(err, RosterError::Store(_)));

    let err = repo.bulk_delete(gt(MEMBER.age, 18)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
}
