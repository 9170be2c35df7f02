use crate::domain::slot::{SlotStatusRecord, UpdateSlotStatusRequest};
use crate::error::AppError;
use crate::store::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_SLOT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone)]
pub struct SlotStatusService {
    pub store: Arc<dyn KeyValueStore<SlotStatusRecord>>,
    pub default_ttl: Duration,
}

impl SlotStatusService {
    pub async fn get(&self, event_id: &str, game_id: &str) -> Result<SlotStatusRecord, AppError> {
        let key = slot_key(event_id, game_id)?;
        self.store
            .get(&key)
            .await
            .map_err(store_err)?
            .ok_or_else(|| AppError::NotFound(format!("slot status for {event_id}/{game_id}")))
    }

    pub async fn set(
        &self,
        event_id: &str,
        game_id: &str,
        req: UpdateSlotStatusRequest,
    ) -> Result<SlotStatusRecord, AppError> {
        let key = slot_key(event_id, game_id)?;
        let ttl = match req.ttl_secs {
            Some(0) => return Err(AppError::validation("ttl_secs must be positive")),
            Some(secs) => Duration::from_secs(secs).min(MAX_SLOT_TTL),
            None => self.default_ttl,
        };

        let record = SlotStatusRecord {
            event_id: event_id.to_string(),
            game_id: game_id.to_string(),
            status: req.status,
            held_by: req.held_by,
            updated_at: chrono::Utc::now(),
        };
        self.store
            .put(&key, record.clone(), ttl)
            .await
            .map_err(store_err)?;
        Ok(record)
    }

    pub async fn clear(&self, event_id: &str, game_id: &str) -> Result<bool, AppError> {
        let key = slot_key(event_id, game_id)?;
        self.store.delete(&key).await.map_err(store_err)
    }
}

pub fn slot_key(event_id: &str, game_id: &str) -> Result<String, AppError> {
    for (name, id) in [("event id", event_id), ("game id", game_id)] {
        if id.trim().is_empty() || id.contains(':') {
            return Err(AppError::validation(format!("invalid {name}")));
        }
    }
    Ok(format!("slot:{event_id}:{game_id}"))
}

fn store_err(e: anyhow::Error) -> AppError {
    AppError::Store(e.to_string())
}
