use std::fs;
use std::path::PathBuf;

use tablesmith_config::Config;
use tablesmith_generate::output::write_store_csvs;
use tablesmith_generate::{GenerateOptions, GenerationEngine};

const CONFIG: &str = r#"
tables:
  - name: person
    count: 4
    columns:
      - name: id
        type: inc
        processor:
          start: 1
          format: "P%03d"
      - name: full_name
        type: gen
        processor:
          value: "${first_name} ${last_name}"
  - name: event
    count: 2
    columns:
      - name: id
        type: inc
        processor:
          start: 100
  - name: attendance
    columns:
      - name: person_id
        type: each
        processor:
          table: person
          column: id
      - name: event_id
        type: each
        processor:
          table: event
          column: id
      - name: status
        type: set
        processor:
          values: [yes, no, maybe]
  - name: summary
    count: 10
    unique_columns: [person_id]
    columns:
      - name: person_id
        type: ref
        processor:
          table: attendance
          column: person_id
      - name: label
        type: const
        processor:
          values: [checked]
"#;

fn run(seed: u64) -> tablesmith_generate::RunOutput {
    let config = Config::from_str(CONFIG).expect("parse config");
    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(seed),
        ..GenerateOptions::default()
    });
    engine.run(&config).expect("run generation")
}

#[test]
fn every_column_of_a_finished_table_has_the_same_length() {
    let output = run(1);

    for table in output.store.iter() {
        let expected = table.row_count();
        for (index, column) in table.columns.iter().enumerate() {
            assert_eq!(
                column.len(),
                expected,
                "column {:?} of table {:?} is ragged",
                table.header[index],
                table.name
            );
        }
    }
}

#[test]
fn each_columns_establish_the_product_row_count() {
    let output = run(1);

    let attendance = output.store.expect("attendance").unwrap();
    assert_eq!(attendance.row_count(), 8, "4 people x 2 events");
    assert_eq!(attendance.header[0], "person_id");
    assert_eq!(attendance.header[1], "event_id");

    let rows = attendance.rows();
    for person in ["P001", "P002", "P003", "P004"] {
        for event in ["100", "101"] {
            let count = rows
                .iter()
                .filter(|row| row[0] == person && row[1] == event)
                .count();
            assert_eq!(count, 1, "pair ({person}, {event}) should appear exactly once");
        }
    }
}

#[test]
fn uniqueness_pass_dedupes_and_is_idempotent() {
    let output = run(2);
    let mut store = output.store;

    let summary = store.expect("summary").unwrap();
    let ids = summary.column("person_id").unwrap().to_vec();
    let distinct: std::collections::HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), distinct.len(), "person_id values should be distinct");

    let before = summary.clone();
    store.get_mut("summary").unwrap().dedupe_rows().unwrap();
    assert_eq!(store.expect("summary").unwrap(), &before);
}

#[test]
fn identical_seeds_reproduce_identical_stores() {
    let first = run(42);
    let second = run(42);

    for table in first.store.iter() {
        let other = second.store.expect(&table.name).unwrap();
        assert_eq!(table, other, "table {:?} should be reproducible", table.name);
    }
}

#[test]
fn reports_cover_every_declared_table() {
    let output = run(3);

    let names: Vec<&str> = output
        .report
        .tables
        .iter()
        .map(|table| table.table.as_str())
        .collect();
    assert_eq!(names, vec!["person", "event", "attendance", "summary"]);
    assert_eq!(output.report.seed, 3);

    let attendance = &output.report.tables[2];
    assert_eq!(attendance.rows, 8);
    assert_eq!(attendance.columns, 3);
}

#[test]
fn failing_columns_carry_table_and_column_context() {
    let config = r#"
tables:
  - name: pet
    count: 3
    columns:
      - name: owner_id
        type: ref
        processor:
          table: person
          column: id
"#;
    let config = Config::from_str(config).expect("parse config");
    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(1),
        ..GenerateOptions::default()
    });

    let err = engine.run(&config).expect_err("missing source table");
    let message = err.to_string();
    assert!(message.contains("pet"), "message should name the table: {message}");
    assert!(message.contains("owner_id"), "message should name the column: {message}");
}

#[test]
fn suppressed_tables_are_not_exported() {
    let config = r#"
tables:
  - name: staging
    count: 2
    suppress: true
    columns:
      - name: id
        type: inc
        processor: { start: 1 }
  - name: final
    count: 2
    columns:
      - name: id
        type: ref
        processor:
          table: staging
          column: id
"#;
    let config = Config::from_str(config).expect("parse config");
    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(1),
        ..GenerateOptions::default()
    });
    let output = engine.run(&config).expect("run generation");

    let dir = temp_dir("suppress");
    let written = write_store_csvs(&dir, &output.store).expect("write csvs");

    let names: Vec<String> = written
        .iter()
        .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, vec!["final.csv".to_string()]);

    let contents = fs::read_to_string(&written[0]).expect("read final.csv");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("id"));
    assert_eq!(lines.clone().count(), 2);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn csv_inputs_feed_downstream_tables() {
    let dir = temp_dir("inputs");
    fs::write(
        dir.join("teams.csv"),
        "team,city\nreds,leeds\nblues,york\n",
    )
    .expect("write input csv");

    let config = r#"
inputs:
  - name: teams
    type: csv
    source:
      file_name: teams.csv

tables:
  - name: roster
    count: 6
    columns:
      - name: team
        type: ref
        processor:
          table: teams
          column: team
"#;
    let config = Config::from_str(config).expect("parse config");
    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(9),
        base_dir: dir.clone(),
    });
    let output = engine.run(&config).expect("run generation");

    let teams = output.store.expect("teams").unwrap();
    assert!(!teams.output, "input tables must not be exported");
    assert_eq!(teams.column("city").unwrap(), &["leeds", "york"]);

    for value in output.store.expect("roster").unwrap().column("team").unwrap() {
        assert!(["reds", "blues"].contains(&value.as_str()));
    }

    fs::remove_dir_all(&dir).ok();
}

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("tablesmith_generate_{label}_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
