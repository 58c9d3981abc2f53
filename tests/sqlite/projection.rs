use rosterdsl::prelude::*;

use crate::common::setup_fixture;

#[test]
fn scalar_projection() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select([MEMBER.username])
        .from(MEMBER.table)
        .order_by([asc(MEMBER.id)]);
    let names: Vec<String> = project_scalar(&executor.fetch(&query).unwrap()).unwrap();
    assert_eq!(names, ["member1", "member2", "member3", "member4"]);

    let wide = select([MEMBER.username, MEMBER.age]).from(MEMBER.table);
    let err = project_scalar::<String>(&executor.fetch(&wide).unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mapping);
}

#[test]
fn tuple_projection_reads_by_expression() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select([MEMBER.username, MEMBER.age])
        .from(MEMBER.table)
        .order_by([asc(MEMBER.id)]);
    let tuples = project_tuples(executor.fetch(&query).unwrap(), &query).unwrap();

    let pairs: Vec<(String, i64)> = tuples
        .iter()
        .map(|t| (t.get(MEMBER.username).unwrap(), t.get(MEMBER.age).unwrap()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("member1".to_owned(), 10),
            ("member2".to_owned(), 20),
            ("member3".to_owned(), 30),
            ("member4".to_owned(), 40),
        ]
    );
    assert_eq!(
        tuples[0].get::<i64>(MEMBER.team_id).unwrap_err().kind(),
        ErrorKind::Mapping
    );
}

#[test]
fn named_dto_projection() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    // Selected in the opposite order of the DTO fields.
    let query = select([MEMBER.age, MEMBER.username])
        .from(MEMBER.table)
        .filter(lte(MEMBER.age, 20));
    let dtos: Vec<MemberDto> = project_named(&executor.fetch(&query).unwrap()).unwrap();
    assert_eq!(
        dtos,
        [
            MemberDto {
                username: Some("member1".into()),
                age: 10
            },
            MemberDto {
                username: Some("member2".into()),
                age: 20
            },
        ]
    );
}

#[test]
fn renamed_fields_with_a_scalar_subquery() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);
    let member_sub = MEMBER.alias("member_sub");

    let max_age = select([max(member_sub.age)]).from(member_sub.table);
    let query = select([MEMBER.username.alias("name"), max_age.alias("age")])
        .from(MEMBER.table)
        .order_by([asc(MEMBER.id)]);
    let users: Vec<UserDto> = project_named(&executor.fetch(&query).unwrap()).unwrap();

    assert_eq!(users.len(), 4);
    assert_eq!(users[0].name.as_deref(), Some("member1"));
    assert!(users.iter().all(|u| u.age == 40));
}

#[test]
fn member_team_dto_through_a_join() {
    let (conn, fixture) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select(member_team_columns())
        .from(MEMBER.table)
        .inner_join(TEAM.table, eq(MEMBER.team_id, TEAM.id))
        .filter(eq(MEMBER.username, "member3"));
    let dtos: Vec<MemberTeamDto> = project(&executor.fetch(&query).unwrap()).unwrap();
    assert_eq!(
        dtos,
        [MemberTeamDto {
            member_id: fixture.members[2].id,
            username: Some("member3".into()),
            age: 30,
            team_id: Some(fixture.team_b.id),
            team_name: Some("teamB".into()),
        }]
    );
}

#[test]
fn entity_tuples_split_at_column_counts() {
    let (conn, fixture) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select(MEMBER.columns())
        .columns(TEAM.columns())
        .from(MEMBER.table)
        .inner_join(TEAM.table, eq(MEMBER.team_id, TEAM.id))
        .filter(eq(TEAM.name, "teamA"))
        .order_by([asc(MEMBER.id)]);
    let pairs: Vec<(Member, Team)> = executor.fetch_as(&query).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, fixture.members[0]);
    assert_eq!(pairs[1].1, fixture.team_a);
}

#[test]
fn distinct_projection() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select_distinct([TEAM.name])
        .from(MEMBER.table)
        .inner_join(TEAM.table, eq(MEMBER.team_id, TEAM.id))
        .order_by([asc(TEAM.name)]);
    let names: Vec<String> = project_scalar(&executor.fetch(&query).unwrap()).unwrap();
    assert_eq!(names, ["teamA", "teamB"]);
    assert_eq!(executor.count(&query).unwrap(), 2);
}
