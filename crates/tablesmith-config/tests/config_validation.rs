use tablesmith_config::{validate_config, Config};

fn codes(config: &str) -> Vec<String> {
    let config = Config::from_str(config).expect("parse config");
    let report = validate_config(&config);
    report.errors.iter().map(|issue| issue.code.clone()).collect()
}

#[test]
fn accepts_a_well_formed_config() {
    let config = r#"
tables:
  - name: person
    count: 5
    unique_columns: [id]
    columns:
      - name: id
        type: inc
        processor:
          start: 1
  - name: pet
    columns:
      - name: owner_id
        type: ref
        processor:
          table: person
          column: id
"#;

    assert!(codes(config).is_empty());
}

#[test]
fn flags_duplicate_tables_and_columns() {
    let config = r#"
tables:
  - name: person
    columns:
      - name: id
        type: inc
        processor: { start: 1 }
      - name: id
        type: inc
        processor: { start: 1 }
  - name: person
    columns: []
"#;

    let codes = codes(config);
    assert!(codes.contains(&"duplicate_table".to_string()));
    assert!(codes.contains(&"duplicate_column".to_string()));
}

#[test]
fn flags_forward_references() {
    let config = r#"
tables:
  - name: pet
    columns:
      - name: owner_id
        type: ref
        processor:
          table: person
          column: id
  - name: person
    columns:
      - name: id
        type: inc
        processor: { start: 1 }
"#;

    assert_eq!(codes(config), vec!["unknown_source_table".to_string()]);
}

#[test]
fn flags_gen_without_exactly_one_mode() {
    let config = r#"
tables:
  - name: person
    columns:
      - name: a
        type: gen
        processor:
          value: "${first_name}"
          pattern: "[a-z]{3}"
      - name: b
        type: gen
        processor:
          null_percentage: 10
"#;

    assert_eq!(codes(config), vec!["gen_mode".to_string(), "gen_mode".to_string()]);
}

#[test]
fn flags_weight_and_value_mismatch() {
    let config = r#"
tables:
  - name: person
    columns:
      - name: tier
        type: set
        processor:
          values: [a, b, c]
          weights: [1, 2]
"#;

    assert_eq!(codes(config), vec!["weight_mismatch".to_string()]);
}

#[test]
fn flags_unknown_unique_column() {
    let config = r#"
tables:
  - name: person
    unique_columns: [missing]
    columns:
      - name: id
        type: inc
        processor: { start: 1 }
"#;

    assert_eq!(codes(config), vec!["unknown_unique_column".to_string()]);
}

#[test]
fn flags_match_column_declared_after_the_match() {
    let config = r#"
tables:
  - name: source
    columns:
      - name: key
        type: inc
        processor: { start: 1 }
  - name: target
    columns:
      - name: looked_up
        type: match
        processor:
          source_table: source
          source_column: key
          source_value: key
          match_column: key_here
      - name: key_here
        type: inc
        processor: { start: 1 }
"#;

    assert_eq!(codes(config), vec!["match_column_order".to_string()]);
}

#[test]
fn flags_zero_length_cuid_and_empty_const() {
    let config = r#"
tables:
  - name: person
    columns:
      - name: id
        type: cuid
        processor:
          length: 0
      - name: fixed
        type: const
        processor:
          values: []
"#;

    let codes = codes(config);
    assert!(codes.contains(&"invalid_length".to_string()));
    assert!(codes.contains(&"empty_values".to_string()));
}

#[test]
fn flags_partial_range_continuation() {
    let config = r#"
tables:
  - name: person
    columns:
      - name: seq
        type: range
        processor:
          type: int
          from: 1
          to: 10
          table: other
"#;

    assert_eq!(codes(config), vec!["partial_continuation".to_string()]);
}
