use crate::auth::CredentialVerifier;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub tracked_year: i32,
    pub data: Arc<Mutex<AppData>>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        tracked_year: i32,
        data: AppData,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            data_path,
            tracked_year,
            data: Arc::new(Mutex::new(data)),
            verifier,
        }
    }
}
