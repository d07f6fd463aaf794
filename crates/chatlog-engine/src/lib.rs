// Engine module - Core flattening logic (turn reconstruction, row aggregation)
// This layer sits between fetched sessions (types) and file export (runtime)

mod error;
pub mod export;
pub mod table;
pub mod turn;

pub use error::{Error, Result};
pub use export::{ExportRow, ExportSummary, FullRow, MinimalRow, RowAggregator, Verbosity};
pub use table::{FULL_COLUMNS, MINIMAL_COLUMNS, Table};
pub use turn::Turns;

use chatlog_types::{Category, Message, Turn};

/// Lazily reconstruct turns from an already-parsed category.
pub fn turns(category: Category, messages: &[Message]) -> Turns<'_> {
    Turns::new(category, messages)
}

/// Reconstruct all turns of a session whose agent declares `category`.
///
/// Fails with [`Error::Category`] when `category` is not general, prompt or rag.
pub fn reconstruct_turns(category: &str, messages: &[Message]) -> Result<Vec<Turn>> {
    let category: Category = category.parse()?;
    Ok(Turns::new(category, messages).collect())
}
