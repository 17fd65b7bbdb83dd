use super::{Address, Val};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// What a cell holds. A cell aliasing its own address is unset and reads
/// as that address.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Value(Val),
    Alias(Address),
}

/// ## Cell memory
///
/// Every integer names exactly one cell for the life of the store, so two
/// expressions that reach the same address share storage. Cells appear
/// unset until first written.

#[derive(Debug, Default)]
pub struct CellStore {
    cells: HashMap<Address, Cell>,
}

impl CellStore {
    pub fn new() -> CellStore {
        CellStore::default()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of cells written so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, address: Address) -> Cell {
        match self.cells.get(&address) {
            Some(cell) => cell.clone(),
            None => Cell::Alias(address),
        }
    }

    /// Last cell of the alias chain starting at `address`.
    pub fn terminal(&self, address: Address) -> Result<Address> {
        let mut at = address;
        for _ in 0..=self.cells.len() {
            match self.cells.get(&at) {
                Some(Cell::Alias(next)) if *next != at => at = *next,
                _ => return Ok(at),
            }
        }
        Err(error!(InternalError; format!("ALIAS CYCLE AT {}", address)))
    }

    pub fn resolve(&self, address: Address) -> Result<Val> {
        let terminal = self.terminal(address)?;
        match self.cells.get(&terminal) {
            Some(Cell::Value(val)) => Ok(val.clone()),
            _ => Ok(Val::Integer(terminal)),
        }
    }

    /// Writes through the alias chain at `address`; the chain itself is
    /// left alone and only its last cell changes. Aliasing a cell to
    /// anything already ending at that same cell is a no-op.
    pub fn rebind(&mut self, address: Address, target: Cell) -> Result<()> {
        let terminal = self.terminal(address)?;
        if let Cell::Alias(to) = target {
            if self.terminal(to)? == terminal {
                trace!(address, terminal, "rebind skipped");
                return Ok(());
            }
        }
        trace!(address, terminal, ?target, "rebind");
        self.cells.insert(terminal, target);
        Ok(())
    }
}
