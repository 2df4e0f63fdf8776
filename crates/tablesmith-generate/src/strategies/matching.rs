//! Post-hoc value matching across tables by a shared key domain.

use std::collections::HashMap;

use tablesmith_config::MatchParams;

use crate::errors::GenerationError;
use crate::strategies::{ColumnStrategy, StrategyContext};

impl ColumnStrategy for MatchParams {
    /// Build a key → value lookup over the source table, then resolve every
    /// row of the target's match column through it; absent keys produce empty
    /// strings. Duplicate source keys resolve to the last occurrence.
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let source = ctx.store.expect(&self.source_table)?;
        let keys = source.column(&self.source_column)?;
        let source_values = source.column(&self.source_value)?;

        let mut lookup: HashMap<&String, &String> = HashMap::with_capacity(keys.len());
        for (key, value) in keys.iter().zip(source_values.iter()) {
            lookup.insert(key, value);
        }

        let target = ctx.target()?;
        let match_column = target.column(&self.match_column)?;

        let values: Vec<String> = match_column
            .iter()
            .map(|key| lookup.get(key).map(|value| (*value).clone()).unwrap_or_default())
            .collect();

        ctx.write_column(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_core::TableStore;

    use crate::strategies::testing::{populate, strings, table_spec};

    fn params() -> MatchParams {
        MatchParams {
            source_table: "history".to_string(),
            source_column: "day".to_string(),
            source_value: "note".to_string(),
            match_column: "day".to_string(),
        }
    }

    #[test]
    fn unmatched_keys_become_empty_strings() {
        let mut store = TableStore::new();
        let history = store.entry("history");
        history.push_column("day", strings(&["2023-01-01", "2023-01-03"]));
        history.push_column("note", strings(&["abc", "def"]));

        store.entry("report").push_column(
            "day",
            strings(&["2023-01-01", "2023-01-02", "2023-01-03"]),
        );

        let spec = table_spec("report", 0);
        populate(&params(), &spec, "note", &mut store, 1).unwrap();

        assert_eq!(
            store.expect("report").unwrap().column("note").unwrap(),
            strings(&["abc", "", "def"])
        );
    }

    #[test]
    fn duplicate_source_keys_resolve_to_the_last_value() {
        let mut store = TableStore::new();
        let history = store.entry("history");
        history.push_column("day", strings(&["d1", "d1"]));
        history.push_column("note", strings(&["first", "second"]));

        store.entry("report").push_column("day", strings(&["d1"]));

        let spec = table_spec("report", 0);
        populate(&params(), &spec, "note", &mut store, 1).unwrap();

        assert_eq!(
            store.expect("report").unwrap().column("note").unwrap(),
            strings(&["second"])
        );
    }

    #[test]
    fn fails_closed_on_a_missing_source_table() {
        let mut store = TableStore::new();
        store.entry("report").push_column("day", strings(&["d1"]));

        let spec = table_spec("report", 0);
        let err = populate(&params(), &spec, "note", &mut store, 1).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Store(tablesmith_core::Error::MissingTable(_))
        ));
    }

    #[test]
    fn fails_on_a_missing_match_column() {
        let mut store = TableStore::new();
        let history = store.entry("history");
        history.push_column("day", strings(&["d1"]));
        history.push_column("note", strings(&["abc"]));

        store.entry("report").push_column("other", strings(&["d1"]));

        let spec = table_spec("report", 0);
        let err = populate(&params(), &spec, "note", &mut store, 1).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Store(tablesmith_core::Error::MissingColumn { .. })
        ));
    }
}
