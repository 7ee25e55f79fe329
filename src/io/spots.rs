//! Spot allocation and occupancy state
//!
//! The pool is the single source of truth for spot occupancy. Selecting a
//! spot (`next_available`) and claiming it (`allocate`) are separate calls,
//! so two concurrent entries can pick the same spot; `allocate` is a
//! conditional update that succeeds for at most one of them, and the loser
//! re-selects.
//!
//! Key behaviors:
//! - A spot's class never changes after pool construction
//! - `next_available` returns the lowest free id, for determinism
//! - `release` of an already-free spot is a successful no-op

use crate::domain::error::Result;
use crate::domain::types::{SpotId, VehicleClass};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Spot-availability contract. A persistent implementation must keep
/// `allocate` a single-spot compare-and-set (claim succeeds only if the
/// spot was still free at claim time).
#[async_trait]
pub trait SpotAllocator: Send + Sync {
    /// Lowest-id free spot of the class, or `None` when the class is full.
    async fn next_available(&self, class: VehicleClass) -> Result<Option<SpotId>>;

    /// Conditionally mark a spot occupied. `Ok(false)` when the spot is no
    /// longer free (lost race) or unknown.
    async fn allocate(&self, spot: SpotId) -> Result<bool>;

    /// Mark a spot free. Releasing an already-free spot succeeds;
    /// `Ok(false)` only for an unknown spot.
    async fn release(&self, spot: SpotId) -> Result<bool>;
}

#[derive(Debug)]
struct SpotRecord {
    class: VehicleClass,
    occupied: bool,
}

/// In-memory spot pool.
///
/// The whole table sits behind one mutex, so the check inside `allocate`
/// is atomic with the flip to occupied.
pub struct MemorySpotPool {
    spots: Mutex<BTreeMap<SpotId, SpotRecord>>,
}

impl MemorySpotPool {
    /// Build a pool with car spots first (ids 1..=car_spots) and bike
    /// spots after them, all free.
    pub fn new(car_spots: u32, bike_spots: u32) -> Self {
        let mut spots = BTreeMap::new();
        for id in 1..=car_spots {
            spots.insert(SpotId(id), SpotRecord { class: VehicleClass::Car, occupied: false });
        }
        for id in car_spots + 1..=car_spots + bike_spots {
            spots.insert(SpotId(id), SpotRecord { class: VehicleClass::Bike, occupied: false });
        }
        Self { spots: Mutex::new(spots) }
    }

    /// Number of currently occupied spots, for logging and tests.
    pub fn occupied_count(&self) -> usize {
        self.spots.lock().values().filter(|r| r.occupied).count()
    }
}

#[async_trait]
impl SpotAllocator for MemorySpotPool {
    async fn next_available(&self, class: VehicleClass) -> Result<Option<SpotId>> {
        let spots = self.spots.lock();
        Ok(spots
            .iter()
            .find(|(_, record)| record.class == class && !record.occupied)
            .map(|(&id, _)| id))
    }

    async fn allocate(&self, spot: SpotId) -> Result<bool> {
        let mut spots = self.spots.lock();
        match spots.get_mut(&spot) {
            Some(record) if !record.occupied => {
                record.occupied = true;
                Ok(true)
            }
            Some(_) => {
                debug!(spot = %spot, "spot_allocate_lost_race");
                Ok(false)
            }
            None => {
                warn!(spot = %spot, "spot_allocate_unknown_spot");
                Ok(false)
            }
        }
    }

    async fn release(&self, spot: SpotId) -> Result<bool> {
        let mut spots = self.spots.lock();
        match spots.get_mut(&spot) {
            Some(record) => {
                record.occupied = false;
                Ok(true)
            }
            None => {
                warn!(spot = %spot, "spot_release_unknown_spot");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_pool() -> MemorySpotPool {
        MemorySpotPool::new(3, 2)
    }

    #[tokio::test]
    async fn test_lowest_id_first() {
        let pool = create_pool();
        assert_eq!(
            pool.next_available(VehicleClass::Car).await.unwrap(),
            Some(SpotId(1))
        );
        assert_eq!(
            pool.next_available(VehicleClass::Bike).await.unwrap(),
            Some(SpotId(4))
        );
    }

    #[tokio::test]
    async fn test_allocate_moves_selection_forward() {
        let pool = create_pool();
        assert!(pool.allocate(SpotId(1)).await.unwrap());
        assert_eq!(
            pool.next_available(VehicleClass::Car).await.unwrap(),
            Some(SpotId(2))
        );
    }

    #[tokio::test]
    async fn test_allocate_is_conditional() {
        let pool = create_pool();
        assert!(pool.allocate(SpotId(1)).await.unwrap());
        // Second claim on the same spot loses
        assert!(!pool.allocate(SpotId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_allocate_unknown_spot() {
        let pool = create_pool();
        assert!(!pool.allocate(SpotId(99)).await.unwrap());
    }

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let pool = create_pool();
        assert!(pool.allocate(SpotId(2)).await.unwrap());
        assert!(pool.release(SpotId(2)).await.unwrap());
        assert!(pool.release(SpotId(2)).await.unwrap());
        assert_eq!(
            pool.next_available(VehicleClass::Car).await.unwrap(),
            Some(SpotId(1))
        );
    }

    #[tokio::test]
    async fn test_release_unknown_spot() {
        let pool = create_pool();
        assert!(!pool.release(SpotId(99)).await.unwrap());
    }

    #[tokio::test]
    async fn test_classes_do_not_mix() {
        let pool = MemorySpotPool::new(1, 1);
        assert!(pool.allocate(SpotId(1)).await.unwrap());
        // Cars are full; bikes unaffected
        assert_eq!(pool.next_available(VehicleClass::Car).await.unwrap(), None);
        assert_eq!(
            pool.next_available(VehicleClass::Bike).await.unwrap(),
            Some(SpotId(2))
        );
    }

    #[tokio::test]
    async fn test_exhaustion_and_recovery() {
        let pool = MemorySpotPool::new(2, 0);
        assert!(pool.allocate(SpotId(1)).await.unwrap());
        assert!(pool.allocate(SpotId(2)).await.unwrap());
        assert_eq!(pool.next_available(VehicleClass::Car).await.unwrap(), None);
        assert_eq!(pool.occupied_count(), 2);

        assert!(pool.release(SpotId(2)).await.unwrap());
        assert_eq!(
            pool.next_available(VehicleClass::Car).await.unwrap(),
            Some(SpotId(2))
        );
    }
}
