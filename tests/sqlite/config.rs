use std::fs;

use rosterdsl::config::{CONFIG_FILE, Error};
use rosterdsl::prelude::*;
use tempfile::TempDir;

use crate::common::setup_fixture;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
join = "inner"
nulls = "last"
average = "truncate"
max_page_size = 50
"#,
    );

    let config = QueryConfig::load_from(&path).unwrap();
    assert_eq!(
        config,
        QueryConfig {
            join: JoinType::Inner,
            nulls: Some(Nulls::Last),
            average: AverageMode::Truncate,
            max_page_size: Some(50),
        }
    );
}

#[test]
fn missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE);

    assert!(matches!(
        QueryConfig::load_from(&path).unwrap_err(),
        Error::NotFound(p) if p == path
    ));
    assert_eq!(
        QueryConfig::load_or_default(&path).unwrap(),
        QueryConfig::default()
    );
}

#[test]
fn rejected_files() {
    let dir = TempDir::new().unwrap();

    let path = write_config(&dir, "joins = \"inner\"\n");
    assert!(matches!(
        QueryConfig::load_or_default(&path).unwrap_err(),
        Error::Parse(..)
    ));

    let path = write_config(&dir, "join = \"cross\"\n");
    assert!(matches!(
        QueryConfig::load_from(&path).unwrap_err(),
        Error::Invalid(_)
    ));
}

#[test]
fn configured_repository_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_page_size = 2\nnulls = \"first\"\n");
    let config = QueryConfig::load_from(&path).unwrap();

    let (conn, _) = setup_fixture();
    let repo = MemberRepository::with_config(&conn, config);
    assert_eq!(repo.config().max_page_size, Some(2));

    let found = repo
        .search_with(
            &MemberSearchCondition::new(),
            SearchOptions::new()
                .order_by(desc(MEMBER.age))
                .page(Page::first(2).unwrap()),
        )
        .unwrap();
    let ages: Vec<i64> = found.results.iter().map(|r| r.age).collect();
    assert_eq!(ages, [40, 30]);
    assert_eq!(found.total, Some(4));
}
