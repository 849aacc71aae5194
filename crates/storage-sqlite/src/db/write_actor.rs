use super::DbPool;
use crate::errors::StorageError;
use budgetly_core::errors::{Error, Result};
use diesel::SqliteConnection;
use log::error;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's connection inside an immediate transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyBox = Box<dyn Any + Send + 'static>;
type Envelope = (Job<AnyBox>, oneshot::Sender<Result<AnyBox>>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Jobs run one at a time, each in its own `BEGIN IMMEDIATE` transaction,
    /// so a read-then-write job sees no interleaved writes. An `Err` from the
    /// job rolls the transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| Error::Unexpected("database writer has stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            Error::Unexpected("database writer dropped the reply".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("database writer returned a mismatched type".to_string()))
    }
}

/// Runs one job, turning a panic into an error so the transaction rolls back
/// and the actor keeps serving later jobs.
fn run_job(
    job: Job<AnyBox>,
    conn: &mut SqliteConnection,
) -> std::result::Result<AnyBox, StorageError> {
    match panic::catch_unwind(AssertUnwindSafe(|| job(conn))) {
        Ok(result) => result.map_err(StorageError::from),
        Err(_) => {
            error!("Database write job panicked; rolling back");
            Err(StorageError::from(Error::Unexpected(
                "database write job panicked".to_string(),
            )))
        }
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor holds one pooled connection for its whole lifetime.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                // Dropping rx makes every exec() report the writer as stopped.
                error!("Database writer could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| run_job(job, c))
                .map_err(Error::from);

            // The requester may have gone away (timeout or cancellation).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
