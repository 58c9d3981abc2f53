use rosterdsl::prelude::*;

use crate::common::setup_fixture;

#[test]
fn totals_over_every_member() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let rows = repo.aggregate(&MemberSearchCondition::new(), None).unwrap();
    assert_eq!(
        rows,
        [AggregateRow {
            key: None,
            count: 4,
            sum: Some(100),
            avg: Some(25.0),
            min: Some(10),
            max: Some(40),
        }]
    );
}

#[test]
fn average_age_per_team() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let rows = repo
        .aggregate(&MemberSearchCondition::new(), Some(TEAM.name))
        .unwrap();
    let per_team: Vec<(Option<Value<'static>>, Option<f64>)> =
        rows.into_iter().map(|r| (r.key, r.avg)).collect();
    assert_eq!(
        per_team,
        [
            (Some(Value::Text("teamA".into())), Some(15.0)),
            (Some(Value::Text("teamB".into())), Some(35.0)),
        ]
    );
}

#[test]
fn criteria_narrow_the_aggregate() {
    let (conn, _) = setup_fixture();
    let repo = MemberRepository::new(&conn);

    let rows = repo
        .aggregate(&MemberSearchCondition::new().with_age_goe(20), None)
        .unwrap();
    assert_eq!(rows[0].count, 3);
    assert_eq!(rows[0].avg, Some(30.0));

    let rows = repo
        .aggregate(&MemberSearchCondition::new().with_age_goe(1000), None)
        .unwrap();
    assert_eq!(rows[0].count, 0);
    assert_eq!((rows[0].sum, rows[0].avg, rows[0].max), (None, None, None));
}

#[test]
fn teamless_members_form_a_null_group() {
    let (conn, fixture) = setup_fixture();
    let mut session = Session::new(&conn);
    session.persist_member(NewMember::new("member5", 50)).unwrap();

    let rows = MemberRepository::new(&conn)
        .aggregate(&MemberSearchCondition::new(), Some(MEMBER.team_id))
        .unwrap();
    let keys: Vec<_> = rows.iter().map(|r| r.key.clone()).collect();
    assert_eq!(
        keys,
        [
            Some(Value::Null),
            Some(Value::Integer(fixture.team_a.id)),
            Some(Value::Integer(fixture.team_b.id)),
        ]
    );
    assert_eq!(rows[0].count, 1);
}

#[test]
fn truncating_average_mode() {
    let (conn, fixture) = setup_fixture();
    let mut session = Session::new(&conn);
    session
        .persist_member(NewMember::new("member5", 11).with_team(&fixture.team_a))
        .unwrap();

    let native = MemberRepository::new(&conn)
        .aggregate(&MemberSearchCondition::new().with_team_name("teamA"), None)
        .unwrap();
    let avg = native[0].avg.unwrap();
    assert!((avg - 41.0 / 3.0).abs() < 1e-9);

    let config = QueryConfig::from_toml_str(r#"average = "truncate""#).unwrap();
    let truncated = MemberRepository::with_config(&conn, config)
        .aggregate(&MemberSearchCondition::new().with_team_name("teamA"), None)
        .unwrap();
    assert_eq!(truncated[0].avg, Some(13.0));
}

#[test]
fn group_by_with_having() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let query = select([TEAM.name.to_sql(), avg(MEMBER.age).alias("avg_age")])
        .from(MEMBER.table)
        .inner_join(TEAM.table, eq(MEMBER.team_id, TEAM.id))
        .group_by([TEAM.name])
        .having(gt(avg(MEMBER.age), 20));
    let rows: Vec<(String, f64)> = executor.fetch_as(query).unwrap();
    assert_eq!(rows, [("teamB".to_owned(), 35.0)]);
}
