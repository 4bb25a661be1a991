//! Dashboard snapshot: catalogue counts plus the per-session visit counter.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::db::{EntityKind, EntityStore};
use crate::errors::AppError;
use crate::session::{
    parse_counter, SessionId, SessionStore, SessionStoreError, VISIT_COUNTER_KEY,
};

/// How the visit counter is advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CounterMode {
    /// Single store-level increment; concurrent visits never share a value.
    #[default]
    Atomic,
    /// Separate read and write. Concurrent visits on one session may both
    /// observe the same value and one increment is lost.
    ReadThenWrite,
}

impl FromStr for CounterMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "read_then_write" => Ok(Self::ReadThenWrite),
            other => Err(format!("unknown visit counter mode '{other}'")),
        }
    }
}

/// Aggregate view returned to the dashboard. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub manufacturer_count: i64,
    pub car_count: i64,
    pub driver_count: i64,
    pub visit_count: i64,
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    sessions: Arc<dyn SessionStore>,
    entities: Arc<dyn EntityStore>,
    mode: CounterMode,
}

impl DashboardService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        entities: Arc<dyn EntityStore>,
        mode: CounterMode,
    ) -> Self {
        Self {
            sessions,
            entities,
            mode,
        }
    }

    pub fn mode(&self) -> CounterMode {
        self.mode
    }

    /// Record one visit for `session` and return the fresh snapshot.
    ///
    /// The counter update and the three counts run concurrently. Any failure
    /// fails the whole call; no partial snapshot is returned.
    pub async fn get_dashboard(&self, session: &SessionId) -> Result<DashboardSnapshot, AppError> {
        let (visit_count, (manufacturer_count, car_count, driver_count)) =
            tokio::try_join!(self.advance_visit_counter(session), self.fetch_counts())?;

        tracing::debug!(
            manufacturer_count,
            car_count,
            driver_count,
            visit_count,
            "Dashboard snapshot built"
        );

        Ok(DashboardSnapshot {
            manufacturer_count,
            car_count,
            driver_count,
            visit_count,
        })
    }

    async fn advance_visit_counter(&self, session: &SessionId) -> Result<i64, AppError> {
        match self.mode {
            CounterMode::Atomic => Ok(self.sessions.increment(session, VISIT_COUNTER_KEY, 1).await?),
            CounterMode::ReadThenWrite => {
                let current = match self.sessions.get(session, VISIT_COUNTER_KEY).await? {
                    Some(raw) => parse_counter(VISIT_COUNTER_KEY, &raw)?,
                    None => 0,
                };
                let next = current
                    .checked_add(1)
                    .ok_or_else(|| SessionStoreError::Overflow {
                        key: VISIT_COUNTER_KEY.to_string(),
                    })?;
                self.sessions
                    .set(session, VISIT_COUNTER_KEY, &next.to_string())
                    .await?;
                Ok(next)
            }
        }
    }

    async fn fetch_counts(&self) -> Result<(i64, i64, i64), AppError> {
        tokio::try_join!(
            self.count(EntityKind::Manufacturer),
            self.count(EntityKind::Car),
            self.count(EntityKind::Driver),
        )
    }

    async fn count(&self, kind: EntityKind) -> Result<i64, AppError> {
        self.entities
            .count(kind)
            .await
            .map_err(|e| AppError::EntityStoreUnavailable(format!("counting {kind}: {e}")))
    }
}
