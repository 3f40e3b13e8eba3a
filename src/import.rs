use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::error::ImportError;
use crate::generator;
use crate::models::Student;
use crate::random::RandomSource;
use crate::state::View;

pub const DEFAULT_IMPORT_DELAY: Duration = Duration::from_secs(2);

/// An import always yields this many records plus up to 19 more.
pub const IMPORT_BASE_SIZE: usize = 150;
const IMPORT_EXTRA_MAX: u32 = 19;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// Display name of the uploaded file. The file itself is never read.
    pub file_name: String,
    pub origin: View,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub students: Vec<Student>,
    pub file_name: String,
    pub origin: View,
}

/// Waits out `delay`, then regenerates a roster of 150 to 169 students.
pub async fn run_import<R>(request: ImportRequest, delay: Duration, rng: &mut R) -> ImportOutcome
where
    R: RandomSource + ?Sized,
{
    tokio::time::sleep(delay).await;

    let extra = rng.int_in(0, IMPORT_EXTRA_MAX) as usize;
    let students = generator::generate(IMPORT_BASE_SIZE + extra, rng);
    info!(
        file = %request.file_name,
        records = students.len(),
        "simulated import finished"
    );

    ImportOutcome {
        students,
        file_name: request.file_name,
        origin: request.origin,
    }
}

/// Handle to an import running on the tokio runtime.
#[derive(Debug)]
pub struct ImportHandle {
    task: JoinHandle<ImportOutcome>,
}

impl ImportHandle {
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn wait(self) -> Result<ImportOutcome, ImportError> {
        Ok(self.task.await?)
    }
}

pub fn spawn_import<R>(request: ImportRequest, delay: Duration, mut rng: R) -> ImportHandle
where
    R: RandomSource + Send + 'static,
{
    info!(file = %request.file_name, ?delay, "starting simulated import");
    let task = tokio::spawn(async move { run_import(request, delay, &mut rng).await });
    ImportHandle { task }
}
