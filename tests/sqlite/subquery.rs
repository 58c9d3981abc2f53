use rosterdsl::prelude::*;

use crate::common::setup_fixture;

fn member_ages(executor: &Executor<'_>, filter: Condition<'_>) -> Vec<i64> {
    let query = select([MEMBER.age])
        .from(MEMBER.table)
        .filter(filter)
        .order_by([asc(MEMBER.age)]);
    project_scalar(&executor.fetch(&query).unwrap()).unwrap()
}

#[test]
fn oldest_member() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);
    let member_sub = MEMBER.alias("member_sub");

    let oldest = select([max(member_sub.age)]).from(member_sub.table);
    assert_eq!(member_ages(&executor, eq(MEMBER.age, oldest)), [40]);
}

#[test]
fn at_least_the_average_age() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);
    let member_sub = MEMBER.alias("member_sub");

    let average = select([avg(member_sub.age)]).from(member_sub.table);
    assert_eq!(member_ages(&executor, gte(MEMBER.age, average)), [30, 40]);
}

#[test]
fn membership_in_a_subquery() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);
    let member_sub = MEMBER.alias("member_sub");

    let older = select([member_sub.age])
        .from(member_sub.table)
        .filter(gt(member_sub.age, 10));
    assert_eq!(
        member_ages(&executor, in_subquery(MEMBER.age, older)),
        [20, 30, 40]
    );
}

#[test]
fn correlated_exists() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);
    let member_sub = MEMBER.alias("member_sub");

    // Members with an older teammate.
    let older_teammate = select([member_sub.id])
        .from(member_sub.table)
        .filter(eq(member_sub.team_id, MEMBER.team_id))
        .filter(gt(member_sub.age, MEMBER.age));
    assert_eq!(
        member_ages(&executor, exists(older_teammate)),
        [10, 30]
    );
}

#[test]
fn scalar_subquery_in_the_select_list() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);
    let member_sub = MEMBER.alias("member_sub");

    let average = select([avg(member_sub.age)]).from(member_sub.table);
    let query = select([MEMBER.username.to_sql(), average.to_sql()])
        .from(MEMBER.table)
        .order_by([asc(MEMBER.id)]);
    let tuples = project_tuples(executor.fetch(&query).unwrap(), &query).unwrap();

    assert_eq!(tuples.len(), 4);
    for tuple in &tuples {
        assert_eq!(tuple.get::<f64>(&average).unwrap(), 25.0);
    }
    assert_eq!(
        tuples[3].get::<String>(MEMBER.username).unwrap(),
        "member4"
    );
}

#[test]
fn in_list_and_between() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    assert_eq!(
        member_ages(&executor, in_list(MEMBER.age, [10, 40, 99])),
        [10, 40]
    );
    assert!(member_ages(&executor, in_list(MEMBER.age, Vec::<i64>::new())).is_empty());
    assert_eq!(member_ages(&executor, between(MEMBER.age, 20, 30)), [20, 30]);
    assert_eq!(
        member_ages(&executor, not(between(MEMBER.age, 20, 30))),
        [10, 40]
    );
}

#[test]
fn scalar_subquery_with_a_labelled_column() {
    let (conn, _) = setup_fixture();
    let executor = Executor::new(&conn);

    let seven = select([constant(7).alias("seven")]);
    let query = select([MEMBER.age.to_sql(), seven.clone().alias("bonus")])
        .from(MEMBER.table)
        .order_by([asc(MEMBER.id)]);
    let rows: Vec<(i64, i64)> = executor.fetch_as(&query).unwrap();
    assert_eq!(rows, [(10, 7), (20, 7), (30, 7), (40, 7)]);

    let query = select([seven])
        .from(MEMBER.table)
        .filter(eq(MEMBER.age, 10));
    let value: i64 = executor.fetch_scalar(&query).unwrap();
    assert_eq!(value, 7);
}
