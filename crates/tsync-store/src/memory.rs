use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tsync_types::Table;

use crate::error::{StoreError, StoreResult};
use crate::traits::{RawRow, RemoteTableHandle};
use crate::write::{apply_writes, table_to_cells, CellWrite, TABLE_COLUMNS};

#[derive(Default)]
struct State {
    cells: Option<Vec<[String; TABLE_COLUMNS]>>,
    create_calls: usize,
    patches: Vec<Vec<CellWrite>>,
}

/// In-memory remote table.
///
/// Intended for tests and embedding. Cells are held as text behind a
/// `RwLock`, and every mutating call is counted so callers can assert how
/// many writes a sync issued. Reads and writes can be made to fail on demand.
pub struct InMemoryRemoteTable {
    state: RwLock<State>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryRemoteTable {
    /// A remote location with no table yet.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// A remote location already holding `table`.
    pub fn with_table(table: &Table) -> Self {
        let remote = Self::new();
        remote.state.write().expect("lock poisoned").cells = Some(table_to_cells(table));
        remote
    }

    /// A remote location holding raw cell text, including text that is not a valid code.
    pub fn with_raw_rows(rows: Vec<RawRow>) -> Self {
        let remote = Self::new();
        remote.state.write().expect("lock poisoned").cells =
            Some(rows.into_iter().map(|(code, desc)| [code, desc]).collect());
        remote
    }

    /// Current contents, or `None` if no table exists.
    pub fn raw_rows(&self) -> Option<Vec<RawRow>> {
        let state = self.state.read().expect("lock poisoned");
        state.cells.as_ref().map(|cells| {
            cells
                .iter()
                .map(|[code, desc]| (code.clone(), desc.clone()))
                .collect()
        })
    }

    /// Number of `create` calls received, successful or not.
    pub fn create_calls(&self) -> usize {
        self.state.read().expect("lock poisoned").create_calls
    }

    /// Number of `patch` calls received, successful or not.
    pub fn patch_calls(&self) -> usize {
        self.state.read().expect("lock poisoned").patches.len()
    }

    /// Every patch batch received, oldest first.
    pub fn patches(&self) -> Vec<Vec<CellWrite>> {
        self.state.read().expect("lock poisoned").patches.clone()
    }

    /// Make `exists` and `fetch_rows` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `create` and `patch` fail after being counted.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read refused".into()));
        }
        Ok(())
    }

    fn check_writes(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write refused".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryRemoteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteTableHandle for InMemoryRemoteTable {
    async fn exists(&self) -> StoreResult<bool> {
        self.check_reads()?;
        Ok(self.state.read().expect("lock poisoned").cells.is_some())
    }

    async fn fetch_rows(&self) -> StoreResult<Vec<RawRow>> {
        self.check_reads()?;
        self.raw_rows().ok_or(StoreError::TableNotFound)
    }

    async fn create(&self, rows: &Table) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        state.create_calls += 1;
        self.check_writes()?;
        if state.cells.is_some() {
            return Err(StoreError::AlreadyExists);
        }
        state.cells = Some(table_to_cells(rows));
        Ok(())
    }

    async fn patch(&self, writes: &[CellWrite]) -> StoreResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        state.patches.push(writes.to_vec());
        self.check_writes()?;
        let cells = state.cells.as_mut().ok_or(StoreError::TableNotFound)?;
        apply_writes(cells, writes)
    }
}

impl std::fmt::Debug for InMemoryRemoteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().expect("lock poisoned");
        f.debug_struct("InMemoryRemoteTable")
            .field("rows", &state.cells.as_ref().map(Vec::len))
            .field("create_calls", &state.create_calls)
            .field("patch_calls", &state.patches.len())
            .finish()
    }
}
