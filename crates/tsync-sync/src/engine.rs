use tracing::{debug, info, warn};
use tsync_diff::{diff_keyed, diff_positional, DiffError};
use tsync_source::SourceTableProvider;
use tsync_store::RemoteTableHandle;
use tsync_types::Table;

use crate::error::{SyncError, SyncResult};
use crate::translate::{diff_to_writes, parse_remote_rows};
use crate::types::{SyncAction, SyncOptions, SyncOutcome, SyncPlan, SyncReport};

/// Decides how to bring a remote table into agreement with an authoritative
/// one, and performs that single write.
///
/// The engine holds no state between runs. Reconciling an already-synced
/// remote is a no-op.
#[derive(Clone, Debug, Default)]
pub struct TableSyncEngine {
    options: SyncOptions,
}

impl TableSyncEngine {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Work out the write needed without issuing it.
    ///
    /// Reads the remote (existence check, then contents) and diffs it
    /// positionally against `authoritative`.
    pub async fn plan<R>(&self, authoritative: &Table, remote: &R) -> SyncResult<SyncPlan>
    where
        R: RemoteTableHandle + ?Sized,
    {
        if !remote.exists().await.map_err(SyncError::RemoteRead)? {
            if authoritative.is_empty() {
                return Err(SyncError::EmptySource);
            }
            debug!(rows = authoritative.len(), "no remote table; planning create");
            return Ok(SyncPlan { action: SyncAction::Create, parse_issues: Vec::new() });
        }

        let raw = remote.fetch_rows().await.map_err(SyncError::RemoteRead)?;
        let (current, parse_issues) = parse_remote_rows(&raw, self.options.parse_policy)?;

        let diff = diff_positional(authoritative, &current).map_err(|e| match e {
            DiffError::ShapeMismatch { authoritative: ours, remote: theirs } => {
                warn!(
                    authoritative = ours,
                    remote = theirs,
                    by_code = %diff_keyed(authoritative, &current),
                    "table shape mismatch"
                );
                SyncError::ShapeMismatch { authoritative: ours, remote: theirs }
            }
        })?;

        let action = if diff.is_empty() {
            SyncAction::Noop
        } else {
            debug!(indices = ?diff.changed_indices, "rows differ");
            SyncAction::Patch(diff_to_writes(&diff))
        };
        Ok(SyncPlan { action, parse_issues })
    }

    /// Issue the write a plan calls for. At most one remote call is made.
    pub async fn apply<R>(
        &self,
        action: &SyncAction,
        authoritative: &Table,
        remote: &R,
    ) -> SyncResult<SyncOutcome>
    where
        R: RemoteTableHandle + ?Sized,
    {
        match action {
            SyncAction::Create => {
                remote.create(authoritative).await.map_err(SyncError::RemoteWrite)?;
                info!(rows = authoritative.len(), "table created");
                Ok(SyncOutcome::Created { rows: authoritative.len() })
            }
            SyncAction::Noop => {
                info!("table unchanged");
                Ok(SyncOutcome::Unchanged)
            }
            SyncAction::Patch(writes) => {
                remote.patch(writes).await.map_err(SyncError::RemoteWrite)?;
                info!(count = writes.len(), "table updated");
                Ok(SyncOutcome::Patched { count: writes.len() })
            }
        }
    }

    /// Plan and apply, keeping any parse issues met on the way.
    pub async fn reconcile_with_report<R>(
        &self,
        authoritative: &Table,
        remote: &R,
    ) -> SyncResult<SyncReport>
    where
        R: RemoteTableHandle + ?Sized,
    {
        let plan = self.plan(authoritative, remote).await?;
        let outcome = self.apply(&plan.action, authoritative, remote).await?;
        Ok(SyncReport { outcome, parse_issues: plan.parse_issues })
    }

    /// Bring `remote` into agreement with `authoritative`.
    pub async fn reconcile<R>(&self, authoritative: &Table, remote: &R) -> SyncResult<SyncOutcome>
    where
        R: RemoteTableHandle + ?Sized,
    {
        Ok(self.reconcile_with_report(authoritative, remote).await?.outcome)
    }

    /// Full run: fetch the authoritative table from `source`, then reconcile.
    pub async fn run<S, R>(&self, source: &S, remote: &R) -> SyncResult<SyncReport>
    where
        S: SourceTableProvider + ?Sized,
        R: RemoteTableHandle + ?Sized,
    {
        let authoritative = source.fetch().await?;
        debug!(rows = authoritative.len(), "authoritative table fetched");
        self.reconcile_with_report(&authoritative, remote).await
    }
}
