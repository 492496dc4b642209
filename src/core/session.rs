use crate::core::planner::RoutePlanner;
use crate::domain::model::{PlanOutcome, RouteForm};
use crate::domain::ports::{RouteClient, Storage};
use crate::utils::error::{Result, RouteMapError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;

/// Keeps at most one route request in flight. Submitting a new request aborts
/// the one still running, which then resolves to [`RouteMapError::Superseded`].
pub struct RouteSession<R: RouteClient + 'static, S: Storage + 'static> {
    planner: Arc<RoutePlanner<R, S>>,
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
    generation: AtomicU64,
}

impl<R: RouteClient + 'static, S: Storage + 'static> RouteSession<R, S> {
    pub fn new(planner: RoutePlanner<R, S>) -> Self {
        Self {
            planner: Arc::new(planner),
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Runs `form` on a spawned task and waits for it.
    pub async fn submit(&self, form: RouteForm) -> Result<PlanOutcome> {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Register before spawning so a later submit always sees this task.
        let handle = {
            let mut slot = self.in_flight.lock().await;
            if let Some((previous, abort)) = slot.take() {
                tracing::info!("Request #{} superseded by #{}", previous, id);
                abort.abort();
            }
            let planner = Arc::clone(&self.planner);
            let handle = tokio::spawn(async move { planner.plan(form).await });
            *slot = Some((id, handle.abort_handle()));
            handle
        };

        let result = handle.await;

        {
            let mut slot = self.in_flight.lock().await;
            if matches!(*slot, Some((current, _)) if current == id) {
                *slot = None;
            }
        }

        match result {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(RouteMapError::Superseded),
            Err(e) => Err(RouteMapError::ProcessingError {
                message: format!("route task failed: {}", e),
            }),
        }
    }

    /// Aborts the request in flight, if any. Returns whether one was running.
    pub async fn cancel(&self) -> bool {
        match self.in_flight.lock().await.take() {
            Some((id, abort)) => {
                tracing::info!("Request #{} cancelled", id);
                abort.abort();
                true
            }
            None => false,
        }
    }

    pub async fn is_busy(&self) -> bool {
        self.in_flight.lock().await.is_some()
    }
}
