//! Multi-column composition.
//!
//! A [`Series`] drives several generators in lockstep: every row reads each
//! column's current value, then advances it. Boolean gate columns decide
//! whether a row is a good sample; a row is good when any gate is true.

use crate::config::SeriesConfig;
use crate::error::Result;
use crate::stats::StatsSnapshot;
use crate::value::{AnyGenerator, Generator, Value};
use serde::{Deserialize, Serialize};

/// One generated row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// 0-based row number.
    pub index: u64,
    /// Whether the sample is good according to the gates.
    pub good: bool,
    /// Column values in column order.
    pub values: Vec<Value>,
}

impl Row {
    /// Value of the column at `position`.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }
}

/// Generators composed column by column.
#[derive(Debug, Clone)]
pub struct Series {
    columns: Vec<AnyGenerator>,
    gates: Vec<usize>,
    rows: u64,
}

impl Series {
    /// Validate `config` and construct every column.
    pub fn new(config: SeriesConfig) -> Result<Self> {
        config.validate()?;

        let gates = config
            .gates
            .iter()
            .filter_map(|gate| config.columns.iter().position(|c| c.id() == gate))
            .collect();

        let columns = config
            .columns
            .into_iter()
            .map(AnyGenerator::from_config)
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "series with {} columns, {} gates",
            columns.len(),
            config.gates.len()
        );

        Ok(Self {
            columns,
            gates,
            rows: 0,
        })
    }

    /// Column identifiers in output order.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.id()).collect()
    }

    /// Positions of the gate columns.
    pub fn gate_positions(&self) -> &[usize] {
        &self.gates
    }

    /// Number of rows produced so far.
    pub fn rows_produced(&self) -> u64 {
        self.rows
    }

    /// Read every column, then advance every column.
    pub fn next_row(&mut self) -> Row {
        let values: Vec<Value> = self.columns.iter().map(|c| c.current()).collect();
        for column in &mut self.columns {
            column.advance();
        }

        let good = self.gates.is_empty()
            || self
                .gates
                .iter()
                .any(|&g| values[g].as_bool().unwrap_or(false));

        let row = Row {
            index: self.rows,
            good,
            values,
        };
        self.rows += 1;
        row
    }

    /// Produce `count` rows.
    pub fn rows(&mut self, count: usize) -> Vec<Row> {
        (0..count).map(|_| self.next_row()).collect()
    }

    /// Snapshot every column's statistics, resetting their slots.
    pub fn stats(&mut self) -> Vec<StatsSnapshot> {
        self.columns.iter_mut().map(|c| c.stats_snapshot()).collect()
    }

    /// Access a column by identifier.
    pub fn column(&self, id: &str) -> Option<&AnyGenerator> {
        self.columns.iter().find(|c| c.id() == id)
    }
}
