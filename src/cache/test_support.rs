//! In-memory provider that counts calls and can be told to fail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{RegistryError, Result};
use crate::models::Vehicle;
use crate::repository::VehicleProvider;

#[derive(Debug, Clone, Copy)]
pub enum Op {
    List = 0,
    Get = 1,
    Insert = 2,
    Update = 3,
    Delete = 4,
}

#[derive(Debug, Default)]
pub struct CountingProvider {
    /// Newest first, like the SQL listing
    records: Mutex<Vec<Vehicle>>,
    calls: [AtomicUsize; 5],
    failure: Mutex<Option<RegistryError>>,
    next_id: AtomicUsize,
}

/// Provider holding `(id, brand, model, year)` rows, first row newest.
pub fn seeded(rows: &[(&str, &str, &str, i32)]) -> CountingProvider {
    let provider = CountingProvider::default();
    {
        let mut records = provider.records.lock().unwrap();
        for (id, brand, model, year) in rows {
            let mut vehicle = Vehicle::new(*brand, *model, *year);
            vehicle.id = id.to_string();
            vehicle.created_at = Utc::now();
            records.push(vehicle);
        }
    }
    provider
}

impl CountingProvider {
    pub fn calls(&self, op: Op) -> usize {
        self.calls[op as usize].load(Ordering::SeqCst)
    }

    /// Every subsequent call returns `err` until reset with `None`.
    pub fn fail_with(&self, err: Option<RegistryError>) {
        *self.failure.lock().unwrap() = err;
    }

    /// Direct view of the stored records, bypassing counters.
    pub fn snapshot(&self) -> Vec<Vehicle> {
        self.records.lock().unwrap().clone()
    }

    fn enter(&self, op: Op) -> Result<()> {
        self.calls[op as usize].fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VehicleProvider for CountingProvider {
    async fn list(&self) -> Result<Vec<Vehicle>> {
        self.enter(Op::List)?;
        Ok(self.snapshot())
    }

    async fn get_by_id(&self, id: &str) -> Result<Vehicle> {
        self.enter(Op::Get)?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(RegistryError::vehicle_not_found)
    }

    async fn insert(&self, vehicle: &mut Vehicle) -> Result<()> {
        self.enter(Op::Insert)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        vehicle.id = format!("generated-{}", n);
        vehicle.created_at = Utc::now();
        self.records.lock().unwrap().insert(0, vehicle.clone());
        Ok(())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        self.enter(Op::Update)?;
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|v| v.id == vehicle.id)
            .ok_or_else(RegistryError::vehicle_not_found)?;
        existing.brand = vehicle.brand.clone();
        existing.model = vehicle.model.clone();
        existing.year = vehicle.year;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.enter(Op::Delete)?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|v| v.id != id);
        if records.len() == before {
            return Err(RegistryError::vehicle_not_found());
        }
        Ok(())
    }
}
