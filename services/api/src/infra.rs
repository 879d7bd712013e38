use loan_qualifier::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// Lending rate applied when a calculator request omits one.
    pub(crate) annual_rate_percent: f64,
}

/// Process-local application store; records are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    fn records(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ApplicationId, ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&record.application_id) {
            guard.insert(record.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard.get(id).cloned())
    }
}
