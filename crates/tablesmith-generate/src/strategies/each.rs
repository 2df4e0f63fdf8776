//! Cartesian expansion over source columns of other tables.
//!
//! All each-columns of a table are expanded together so they start with the
//! same row count; their relative order matches declaration order.

use tablesmith_config::{ColumnKind, TableSpec};
use tablesmith_core::{cartesian_product, transpose, TableStore};

use crate::errors::GenerationError;
use crate::strategies::cycle_to;

/// Expand every each-column of the table and write the resulting columns into
/// the store simultaneously. Zero each-columns is a no-op.
pub fn generate_each_columns(
    spec: &TableSpec,
    store: &mut TableStore,
) -> Result<(), GenerationError> {
    let mut names = Vec::new();
    let mut sources = Vec::new();

    for column in &spec.columns {
        let ColumnKind::Each(params) = &column.kind else {
            continue;
        };

        let source = store
            .expect(&params.table)
            .and_then(|table| table.column(&params.column))
            .map_err(|err| GenerationError::for_column(&spec.name, &column.name, err.into()))?;

        names.push(column.name.clone());
        sources.push(source.to_vec());
    }

    if names.is_empty() {
        return Ok(());
    }

    let product = cartesian_product(&sources);
    let mut columns = transpose(&product);
    if columns.is_empty() {
        columns = vec![Vec::new(); names.len()];
    }

    // A declared count overrides the product size via cyclic repetition or
    // truncation.
    if spec.count > 0 && product.len() != spec.count {
        for column in &mut columns {
            *column = cycle_to(column, spec.count);
        }
    }

    let table = store.entry(&spec.name);
    for (name, column) in names.into_iter().zip(columns) {
        table.push_column(name, column);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_config::{ColumnSpec, TableColumnRef};

    use crate::strategies::testing::{strings, table_spec};

    fn each_column(name: &str, table: &str, column: &str) -> ColumnSpec {
        ColumnSpec {
            name: name.to_string(),
            kind: ColumnKind::Each(TableColumnRef {
                table: table.to_string(),
                column: column.to_string(),
            }),
        }
    }

    fn seeded_store() -> TableStore {
        let mut store = TableStore::new();
        store
            .entry("person")
            .push_column("id", strings(&["p1", "p2", "p3"]));
        store
            .entry("event")
            .push_column("id", strings(&["e1", "e2"]));
        store
    }

    #[test]
    fn expands_the_full_product_exactly_once() {
        let mut store = seeded_store();
        let mut spec = table_spec("attendance", 0);
        spec.columns = vec![
            each_column("person_id", "person", "id"),
            each_column("event_id", "event", "id"),
        ];

        generate_each_columns(&spec, &mut store).unwrap();

        let table = store.expect("attendance").unwrap();
        assert_eq!(table.header, strings(&["person_id", "event_id"]));
        assert_eq!(table.row_count(), 6);

        // First source cycles fastest.
        assert_eq!(
            table.column("person_id").unwrap(),
            strings(&["p1", "p2", "p3", "p1", "p2", "p3"])
        );
        assert_eq!(
            table.column("event_id").unwrap(),
            strings(&["e1", "e1", "e1", "e2", "e2", "e2"])
        );

        let rows = table.rows();
        for person in ["p1", "p2", "p3"] {
            for event in ["e1", "e2"] {
                let count = rows
                    .iter()
                    .filter(|row| row[0] == person && row[1] == event)
                    .count();
                assert_eq!(count, 1, "pair ({person}, {event}) should appear exactly once");
            }
        }
    }

    #[test]
    fn declared_count_resizes_the_product() {
        let mut store = seeded_store();
        let mut spec = table_spec("attendance", 4);
        spec.columns = vec![each_column("person_id", "person", "id")];

        generate_each_columns(&spec, &mut store).unwrap();

        assert_eq!(
            store.expect("attendance").unwrap().column("person_id").unwrap(),
            strings(&["p1", "p2", "p3", "p1"])
        );
    }

    #[test]
    fn no_each_columns_is_a_no_op() {
        let mut store = seeded_store();
        let spec = table_spec("empty", 0);

        generate_each_columns(&spec, &mut store).unwrap();
        assert!(store.get("empty").is_none());
    }

    #[test]
    fn missing_source_table_fails_closed() {
        let mut store = TableStore::new();
        let mut spec = table_spec("attendance", 0);
        spec.columns = vec![each_column("person_id", "person", "id")];

        let err = generate_each_columns(&spec, &mut store).unwrap_err();
        assert!(err.to_string().contains("person_id"));
        assert!(store.get("attendance").is_none());
    }
}
