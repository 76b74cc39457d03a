use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{Slot, SlotError, DAY_PERIODS};

const COLLECTION: &str = "slots";

pub struct SlotService {
    store: StoreClient,
}

impl SlotService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Slots for a (doctor, date) pair. The first query for a date
    /// materializes the three default periods, all unbooked.
    pub async fn get_or_generate(
        &self,
        doctor_id: &str,
        date: &str,
    ) -> Result<Vec<Slot>, SlotError> {
        let filters = [
            ("doctor_id", doctor_id.to_string()),
            ("date", date.to_string()),
        ];

        let existing: Vec<Slot> = self
            .store
            .find(COLLECTION, &filters)
            .await
            .map_err(|e| SlotError::Database(e.to_string()))?;

        if !existing.is_empty() {
            return Ok(existing);
        }

        debug!("No slots for doctor {} on {}, generating", doctor_id, date);

        let documents = DAY_PERIODS
            .iter()
            .map(|period| {
                json!({
                    "doctor_id": doctor_id,
                    "date": date,
                    "time": period,
                    "period": period,
                    "is_booked": false,
                })
            })
            .collect();

        let created = self
            .store
            .insert_many(COLLECTION, documents)
            .await
            .map_err(|e| SlotError::Database(e.to_string()))?;

        info!("Generated {} slots for doctor {} on {}", DAY_PERIODS.len(), doctor_id, date);
        Ok(created)
    }

    pub async fn get(&self, slot_id: &str) -> Result<Option<Slot>, SlotError> {
        self.store
            .find_by_id(COLLECTION, slot_id)
            .await
            .map_err(|e| SlotError::Database(e.to_string()))
    }

    /// Mark a slot booked. The update only applies while the slot is still
    /// unbooked, so of two concurrent claims exactly one sees a row come
    /// back; the loser gets [`SlotError::AlreadyBooked`].
    pub async fn claim(&self, slot_id: &str) -> Result<Slot, SlotError> {
        let filters = [
            ("id", slot_id.to_string()),
            ("is_booked", "false".to_string()),
        ];

        let claimed: Vec<Slot> = self
            .store
            .update_where(COLLECTION, &filters, json!({ "is_booked": true }))
            .await
            .map_err(|e| SlotError::Database(e.to_string()))?;

        match claimed.into_iter().next() {
            Some(slot) => Ok(slot),
            None => match self.get(slot_id).await? {
                Some(_) => Err(SlotError::AlreadyBooked),
                None => Err(SlotError::NotFound),
            },
        }
    }

    /// Flip a slot back to unbooked. Returns whether the slot still existed.
    pub async fn release(&self, slot_id: &str) -> Result<bool, SlotError> {
        let released: Vec<Slot> = self
            .store
            .update_where(
                COLLECTION,
                &[("id", slot_id.to_string())],
                json!({ "is_booked": false }),
            )
            .await
            .map_err(|e| SlotError::Database(e.to_string()))?;

        Ok(!released.is_empty())
    }
}
