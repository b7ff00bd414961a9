use metrics::counter;
use tracing::{info, warn};

use jobdeck_client::{JobStoreClient, JobStoreError};
use jobdeck_core::types::{FilterCriteria, Intent, JobDraft, JobPatch, JobRecord, JobStatus};
use jobdeck_core::view::{derive_view, StatusCounts};

/// View model for the job dashboard.
///
/// Owns the authoritative record list and the active criteria; the
/// displayed subset and the status counters are derived on every read
/// rather than cached. Operations are async and applied only after the
/// remote service confirms; dropping an operation future before it
/// completes abandons the call without touching local state.
pub struct Dashboard {
    client: JobStoreClient,
    jobs: Vec<JobRecord>,
    criteria: FilterCriteria,
    loading: bool,
    last_error: Option<JobStoreError>,
}

impl Dashboard {
    /// Creates an empty dashboard over the provided client.
    pub fn new(client: JobStoreClient) -> Self {
        Self {
            client,
            jobs: Vec::new(),
            criteria: FilterCriteria::default(),
            loading: false,
            last_error: None,
        }
    }

    /// Routes an intent to the matching operation.
    ///
    /// Load failures are recorded on the dashboard itself so the render
    /// layer can replace the list with the error view; mutation failures
    /// propagate to the caller and leave local state untouched.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<(), JobStoreError> {
        let kind = intent.kind();
        let (result, ok) = match intent {
            Intent::LoadRequested => {
                self.load().await;
                (Ok(()), self.last_error.is_none())
            }
            Intent::SubmitRequested { draft, editing_id } => {
                let result = self.submit(draft, editing_id.as_deref()).await.map(|_| ());
                let ok = result.is_ok();
                (result, ok)
            }
            Intent::DeleteRequested { id } => {
                let result = self.remove(&id).await;
                let ok = result.is_ok();
                (result, ok)
            }
            Intent::StatusChangeRequested { id, status } => {
                let result = self.set_status(&id, status).await.map(|_| ());
                let ok = result.is_ok();
                (result, ok)
            }
            Intent::FilterChanged { criteria } => {
                self.set_criteria(criteria);
                (Ok(()), true)
            }
        };

        counter!(
            "dashboard_requests_total",
            "intent" => kind,
            "result" => if ok { "ok" } else { "error" }
        )
        .increment(1);

        result
    }

    /// Replaces the authoritative list from the remote service.
    ///
    /// On failure the previous list is kept and the error is recorded
    /// for the render layer; retrying is up to the caller.
    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.client.list_jobs().await;
        self.loading = false;

        match result {
            Ok(jobs) => {
                info!(stage = "dashboard", count = jobs.len(), "loaded job records");
                self.jobs = jobs;
                self.last_error = None;
            }
            Err(err) => {
                warn!(stage = "dashboard", error = %err, "failed to load job records");
                self.last_error = Some(err);
            }
        }
    }

    /// Creates a new record or updates an existing one.
    ///
    /// There is no optimistic insert: on failure the authoritative list
    /// is exactly as it was before the call.
    pub async fn submit(
        &mut self,
        draft: JobDraft,
        editing_id: Option<&str>,
    ) -> Result<JobRecord, JobStoreError> {
        match editing_id {
            Some(id) => {
                let updated = self.client.update_job(id, &JobPatch::from(draft)).await?;
                info!(stage = "dashboard", id = %updated.id, "updated job record");
                self.replace_by_id(&updated);
                Ok(updated)
            }
            None => {
                let created = self.client.create_job(&draft).await?;
                info!(stage = "dashboard", id = %created.id, "created job record");
                self.jobs.push(created.clone());
                Ok(created)
            }
        }
    }

    /// Deletes the record and drops it from the list on success.
    pub async fn remove(&mut self, id: &str) -> Result<(), JobStoreError> {
        self.client.delete_job(id).await?;
        info!(stage = "dashboard", id, "deleted job record");
        self.jobs.retain(|job| job.id != id);
        Ok(())
    }

    /// Applies a status-only update; the stored record is replaced by
    /// the canonical one returned by the service.
    pub async fn set_status(
        &mut self,
        id: &str,
        status: JobStatus,
    ) -> Result<JobRecord, JobStoreError> {
        let updated = self
            .client
            .update_job(id, &JobPatch::status_only(status))
            .await?;
        info!(stage = "dashboard", id = %updated.id, status = %status, "changed job status");
        self.replace_by_id(&updated);
        Ok(updated)
    }

    /// Replaces the active criteria; the derived view reflects the
    /// change on its next read.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Authoritative list in arrival order.
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    /// True while a load is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Error recorded by the most recent failed load, cleared by the
    /// next successful one.
    pub fn last_error(&self) -> Option<&JobStoreError> {
        self.last_error.as_ref()
    }

    /// Derived view of the list under the active criteria.
    pub fn filtered_jobs(&self) -> Vec<JobRecord> {
        derive_view(&self.jobs, &self.criteria)
    }

    /// Status counters over the unfiltered list.
    pub fn counters(&self) -> StatusCounts {
        StatusCounts::tally(&self.jobs)
    }

    fn replace_by_id(&mut self, record: &JobRecord) {
        if let Some(slot) = self.jobs.iter_mut().find(|job| job.id == record.id) {
            *slot = record.clone();
        }
    }

    #[cfg(test)]
    pub(crate) fn seed_jobs(&mut self, jobs: Vec<JobRecord>) {
        self.jobs = jobs;
    }

    #[cfg(test)]
    pub(crate) fn seed_error(&mut self, error: JobStoreError) {
        self.last_error = Some(error);
    }

    #[cfg(test)]
    pub(crate) fn seed_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
