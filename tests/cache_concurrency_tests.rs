//! Integration Tests for the caching decorator over SQLite
//!
//! Exercises real-time expiry and concurrent access against the actual
//! repository instead of an in-process fake.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vehicle_registry::repository::database;
use vehicle_registry::{
    CachingVehicleProvider, RegistryError, Result, SqliteVehicleRepository, Vehicle,
    VehicleProvider,
};

// == Helper Functions ==

/// Counts the calls that reach the wrapped provider.
struct Counting<P> {
    inner: P,
    lists: AtomicUsize,
    gets: AtomicUsize,
}

impl<P> Counting<P> {
    fn new(inner: P) -> Self {
        Self {
            inner,
            lists: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
        }
    }

    fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<P: VehicleProvider> VehicleProvider for Counting<P> {
    async fn list(&self) -> Result<Vec<Vehicle>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Vehicle> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(id).await
    }

    async fn insert(&self, vehicle: &mut Vehicle) -> Result<()> {
        self.inner.insert(vehicle).await
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        self.inner.update(vehicle).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.inner.delete(id).await
    }
}

type CountingRepo = Arc<Counting<SqliteVehicleRepository>>;

async fn repository() -> CountingRepo {
    let pool = database::connect("sqlite::memory:", 1).await.unwrap();
    Arc::new(Counting::new(SqliteVehicleRepository::new(pool)))
}

async fn seed(repo: &CountingRepo, brand: &str, model: &str, year: i32) -> Vehicle {
    let mut vehicle = Vehicle::new(brand.to_string(), model.to_string(), year);
    repo.insert(&mut vehicle).await.unwrap();
    vehicle
}

// == Expiry Tests ==

#[tokio::test]
async fn test_get_by_id_expires_after_ttl() {
    let repo = repository().await;
    let stored = seed(&repo, "BMW", "X5", 2022).await;
    let cache = CachingVehicleProvider::new(repo.clone(), Duration::from_millis(200));

    let first = cache.get_by_id(&stored.id).await.unwrap();
    assert_eq!(first, stored);
    assert_eq!(repo.gets(), 1);

    cache.get_by_id(&stored.id).await.unwrap();
    assert_eq!(repo.gets(), 1);

    tokio::time::sleep(Duration::from_millis(250)).await;
    cache.get_by_id(&stored.id).await.unwrap();
    assert_eq!(repo.gets(), 2);
}

#[tokio::test]
async fn test_insert_invalidates_listing() {
    let repo = repository().await;
    seed(&repo, "BMW", "X5", 2022).await;
    let cache = CachingVehicleProvider::new(repo.clone(), Duration::from_secs(60));

    assert_eq!(cache.list().await.unwrap().len(), 1);
    assert_eq!(cache.list().await.unwrap().len(), 1);
    assert_eq!(repo.lists(), 1);

    let mut added = Vehicle::new("Audi".to_string(), "Avant".to_string(), 2019);
    cache.insert(&mut added).await.unwrap();

    let listing = cache.list().await.unwrap();
    assert_eq!(repo.lists(), 2);
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, added.id);

    // Insert populated the entry
    cache.get_by_id(&added.id).await.unwrap();
    assert_eq!(repo.gets(), 0);
}

#[tokio::test]
async fn test_not_found_leaves_cache_untouched() {
    let repo = repository().await;
    let stored = seed(&repo, "BMW", "X5", 2022).await;
    let cache = CachingVehicleProvider::new(repo.clone(), Duration::from_secs(60));
    cache.get_by_id(&stored.id).await.unwrap();

    let mut ghost = stored.clone();
    ghost.id = uuid::Uuid::new_v4().to_string();
    assert!(cache.update(&ghost).await.unwrap_err().is_not_found());
    assert!(cache.delete(&ghost.id).await.unwrap_err().is_not_found());

    assert_eq!(cache.get_by_id(&stored.id).await.unwrap(), stored);
    assert_eq!(repo.gets(), 1);
}

// == Concurrency Tests ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mixed_operations() {
    let repo = repository().await;
    let mut ids = Vec::new();
    for year in 2000..2010 {
        ids.push(seed(&repo, "Volvo", "Estate", year).await.id);
    }
    let ttl = Duration::from_millis(100);
    let cache = Arc::new(CachingVehicleProvider::new(repo.clone(), ttl));
    let ids = Arc::new(ids);

    let mut handles = Vec::new();
    for task in 0..32usize {
        let cache = cache.clone();
        let ids = ids.clone();
        handles.push(tokio::spawn(async move {
            for step in 0..20usize {
                let id = &ids[(task + step) % ids.len()];
                let outcome = match (task + step) % 5 {
                    0 => cache.list().await.map(|_| ()),
                    1 => cache.get_by_id(id).await.map(|_| ()),
                    2 => {
                        let mut vehicle =
                            Vehicle::new("Saab".to_string(), "Aero".to_string(), 2001);
                        cache.insert(&mut vehicle).await
                    }
                    3 => match cache.get_by_id(id).await {
                        Ok(mut vehicle) => {
                            vehicle.year = 1990 + (step as i32);
                            cache.update(&vehicle).await
                        }
                        Err(err) => Err(err),
                    },
                    _ if task % 8 == 0 => cache.delete(id).await,
                    _ => cache.get_by_id(id).await.map(|_| ()),
                };

                match outcome {
                    Ok(()) | Err(RegistryError::NotFound(_)) => {}
                    Err(other) => panic!("unexpected error: {}", other),
                }
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    // Racing fills may leave stale copies behind, but never past one TTL
    tokio::time::sleep(ttl + Duration::from_millis(50)).await;

    let truth = repo.list().await.unwrap();
    assert_eq!(cache.list().await.unwrap(), truth);
    for vehicle in &truth {
        assert_eq!(&cache.get_by_id(&vehicle.id).await.unwrap(), vehicle);
    }
    for id in ids.iter() {
        if !truth.iter().any(|v| &v.id == id) {
            assert!(cache.get_by_id(id).await.unwrap_err().is_not_found());
        }
    }
}
