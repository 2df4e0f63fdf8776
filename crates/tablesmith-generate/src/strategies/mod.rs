//! Column generation strategies, one per column kind.
//!
//! Each kind's parameter struct implements [`ColumnStrategy`]; the
//! orchestrator matches the kind tag once and dispatches here. Strategies
//! read already-complete tables out of the store and append exactly one
//! fully populated column to the target table.

pub mod constant;
pub mod cuid;
pub mod dates;
pub mod each;
pub mod expr;
pub mod faker;
pub mod r#gen;
pub mod inc;
pub mod matching;
pub mod rand;
pub mod range;
pub mod reference;
pub mod rel_date;
pub mod set;
pub mod weighted;

use rand_chacha::ChaCha8Rng;

use tablesmith_config::{ColumnKind, TableSpec};
use tablesmith_core::{Table, TableStore};

use crate::errors::GenerationError;

/// Everything a strategy needs to populate one column.
pub struct StrategyContext<'a> {
    pub store: &'a mut TableStore,
    pub table: &'a TableSpec,
    pub column: &'a str,
    pub rng: &'a mut ChaCha8Rng,
}

impl StrategyContext<'_> {
    /// Row count this strategy must produce, recomputed fresh because the
    /// table mutates between strategy invocations.
    pub fn working_count(&self) -> usize {
        inferred_count(self.store.get(&self.table.name), self.table.count)
    }

    /// Append the finished column to the target table, creating the table
    /// lazily on first write.
    pub fn write_column(&mut self, values: Vec<String>) {
        let column = self.column.to_string();
        self.store.entry(&self.table.name).push_column(column, values);
    }

    /// The target table as materialized so far.
    pub fn target(&self) -> Result<&Table, GenerationError> {
        Ok(self.store.expect(&self.table.name)?)
    }
}

/// The declared table count while the table is still empty, otherwise the
/// length of the table's currently-longest column.
pub fn inferred_count(table: Option<&Table>, declared: usize) -> usize {
    let longest = table.map(Table::row_count).unwrap_or(0);
    if longest == 0 {
        declared
    } else {
        longest
    }
}

/// The single capability every column kind provides.
pub trait ColumnStrategy {
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError>;
}

/// Dispatch a column to its strategy. Each-columns are expanded ahead of the
/// per-column pass, so they are a no-op here.
pub fn dispatch(kind: &ColumnKind, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
    match kind {
        ColumnKind::Each(_) => Ok(()),
        ColumnKind::Const(params) => params.populate(ctx),
        ColumnKind::Ref(params) => params.populate(ctx),
        ColumnKind::Gen(params) => params.populate(ctx),
        ColumnKind::Set(params) => params.populate(ctx),
        ColumnKind::Inc(params) => params.populate(ctx),
        ColumnKind::Range(params) => params.populate(ctx),
        ColumnKind::Match(params) => params.populate(ctx),
        ColumnKind::Expr(params) => params.populate(ctx),
        ColumnKind::Rand(params) => params.populate(ctx),
        ColumnKind::RelDate(params) => params.populate(ctx),
        ColumnKind::Cuid(params) => params.populate(ctx),
    }
}

/// Repeat `values` cyclically until `count` entries, or truncate to the
/// needed head when there are too many.
pub(crate) fn cycle_to(values: &[String], count: usize) -> Vec<String> {
    values.iter().cloned().cycle().take(count).collect()
}
