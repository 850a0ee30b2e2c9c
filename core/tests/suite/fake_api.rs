//! In-memory gateway used by the integration suite.

use std::sync::Mutex;

use async_trait::async_trait;
use intake_core::{
    AdminApi, AdminSnapshot, CreatedRestaurant, DatabaseStats, IntakeError, RecordPayload,
    RestaurantApi, RestaurantRecord, Result, SortSpec,
};

#[derive(Debug, Default)]
pub struct Calls {
    pub create: Vec<RecordPayload>,
    pub list: Vec<SortSpec>,
    pub fallback: usize,
    pub deletes: Vec<String>,
}

#[derive(Default)]
pub struct FakeApi {
    pub records: Mutex<Vec<RestaurantRecord>>,
    pub fail_primary: bool,
    pub fail_fallback: bool,
    pub fail_create: bool,
    pub fail_db_stats: bool,
    pub calls: Mutex<Calls>,
}

impl FakeApi {
    pub fn with_records(records: Vec<RestaurantRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.calls.lock().unwrap().create.len()
    }

    pub fn fallback_calls(&self) -> usize {
        self.calls.lock().unwrap().fallback
    }
}

pub fn record(id: &str, name: &str, city: &str, state: &str) -> RestaurantRecord {
    RestaurantRecord {
        id: Some(id.to_string()),
        restaurant_name: Some(name.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl RestaurantApi for FakeApi {
    async fn create(&self, payload: &RecordPayload) -> Result<CreatedRestaurant> {
        self.calls.lock().unwrap().create.push(payload.clone());
        if self.fail_create {
            return Err(IntakeError::http_status(500, "Failed to save restaurant"));
        }
        let mut records = self.records.lock().unwrap();
        let id = format!("id-{}", records.len() + 1);
        records.push(RestaurantRecord {
            id: Some(id.clone()),
            restaurant_name: Some(payload.restaurant_name.clone()),
            city: Some(payload.city.clone()),
            state: Some(payload.state.clone()),
            restaurant_key: Some(payload.restaurant_key.clone()),
            created_at: Some(payload.created_at.clone()),
            ..Default::default()
        });
        Ok(CreatedRestaurant {
            id,
            restaurant_key: Some(payload.restaurant_key.clone()),
            message: Some("Restaurant saved successfully".to_string()),
        })
    }

    async fn list(&self, sort: SortSpec) -> Result<Vec<RestaurantRecord>> {
        self.calls.lock().unwrap().list.push(sort);
        if self.fail_primary {
            return Err(IntakeError::http_status(503, "unavailable"));
        }
        let mut records = self.records.lock().unwrap().clone();
        intake_core::list::sort_records(&mut records, sort);
        Ok(records)
    }

    async fn list_fallback(&self) -> Result<Vec<RestaurantRecord>> {
        self.calls.lock().unwrap().fallback += 1;
        if self.fail_fallback {
            return Err(IntakeError::network("connection refused"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<RestaurantRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| IntakeError::http_status(404, "Restaurant not found"))
    }

    async fn update(&self, _id: &str, _payload: &RecordPayload) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.admin_delete(id).await
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn admin_restaurants(&self) -> Result<AdminSnapshot> {
        Ok(AdminSnapshot {
            restaurants: self.records.lock().unwrap().clone(),
            stats: None,
        })
    }

    async fn database_stats(&self) -> Result<DatabaseStats> {
        if self.fail_db_stats {
            return Err(IntakeError::http_status(500, "Failed to load database stats"));
        }
        let count = self.records.lock().unwrap().len() as u64;
        Ok(DatabaseStats {
            collections: vec!["restaurants".to_string()],
            collection_stats: [("restaurants".to_string(), count)].into_iter().collect(),
            total_collections: 1,
        })
    }

    async fn admin_delete(&self, id: &str) -> Result<()> {
        self.calls.lock().unwrap().deletes.push(id.to_string());
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id.as_deref() != Some(id));
        if records.len() == before {
            return Err(IntakeError::http_status(404, "Restaurant not found"));
        }
        Ok(())
    }
}
