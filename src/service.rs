//! Vehicle Service
//!
//! Business rules between the HTTP handlers and whichever [`VehicleProvider`]
//! backs the service. Every provider call runs under a deadline; when it
//! elapses the provider future is dropped, which cancels the call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::error::{RegistryError, Result};
use crate::models::{
    to_responses, CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleResponse,
};
use crate::repository::VehicleProvider;

/// Use cases for vehicle records.
#[derive(Clone)]
pub struct VehicleService {
    provider: Arc<dyn VehicleProvider>,
    timeout: Duration,
}

impl VehicleService {
    pub fn new(provider: Arc<dyn VehicleProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    async fn with_deadline<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("provider call exceeded {:?}", self.timeout);
                Err(RegistryError::Internal("request timed out".to_string()))
            }
        }
    }

    /// Validates and stores a new vehicle.
    pub async fn create(&self, req: CreateVehicleRequest) -> Result<VehicleResponse> {
        if let Some(msg) = req.validate() {
            return Err(RegistryError::InvalidInput(msg));
        }

        let mut vehicle = Vehicle::new(req.brand, req.model, req.year);
        self.with_deadline(self.provider.insert(&mut vehicle)).await?;
        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>> {
        let vehicles = self.with_deadline(self.provider.list()).await?;
        Ok(to_responses(vehicles))
    }

    pub async fn get(&self, id: &str) -> Result<VehicleResponse> {
        let vehicle = self.with_deadline(self.provider.get_by_id(id)).await?;
        Ok(vehicle.into())
    }

    /// Applies the non-empty fields of `req` on top of the stored record.
    pub async fn update(&self, id: &str, req: UpdateVehicleRequest) -> Result<VehicleResponse> {
        if let Some(msg) = req.validate() {
            return Err(RegistryError::InvalidInput(msg));
        }

        let mut vehicle = self.with_deadline(self.provider.get_by_id(id)).await?;
        if !req.brand.is_empty() {
            vehicle.brand = req.brand;
        }
        if !req.model.is_empty() {
            vehicle.model = req.model;
        }
        if req.year != 0 {
            vehicle.year = req.year;
        }

        self.with_deadline(self.provider.update(&vehicle)).await?;
        Ok(vehicle.into())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.with_deadline(self.provider.delete(id)).await
    }
}
