// Catalog store: the owned, copy-on-write home of the rental item list.
// Readers take an Arc snapshot; every insertion publishes a new one.

use crate::catalog::{self, CatalogError, FilterSpec};
use crate::models::{NewRentalItem, RentalItem};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct StoreStats {
    pub items_count: AtomicUsize,
    pub snapshot_reads: AtomicUsize,
    pub inserts: AtomicUsize,
    pub lookups: AtomicUsize,
    pub lookup_misses: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreStatsReport {
    pub items_count: usize,
    pub snapshot_reads: usize,
    pub inserts: usize,
    pub lookups: usize,
    pub lookup_misses: usize,
}

pub struct CatalogStore {
    items: RwLock<Arc<Vec<RentalItem>>>,
    stats: StoreStats,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CatalogStore {
    pub fn new(items: Vec<RentalItem>) -> Self {
        let stats = StoreStats::default();
        stats.items_count.store(items.len(), Ordering::SeqCst);
        Self {
            items: RwLock::new(Arc::new(items)),
            stats,
        }
    }

    pub fn with_sample_catalog() -> Result<Self, CatalogError> {
        let items = catalog::load_sample_catalog()?;
        info!("Loaded sample catalog with {} items", items.len());
        Ok(Self::new(items))
    }

    // Current snapshot; later insertions never change what it holds
    pub fn get(&self) -> Arc<Vec<RentalItem>> {
        self.stats.snapshot_reads.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.items.read())
    }

    pub fn add(&self, new_item: NewRentalItem) -> String {
        let mut items = self.items.write();
        let (next, id) = catalog::add(&items, new_item);
        let len = next.len();
        *items = Arc::new(next);
        // Count is published under the write lock so it never regresses
        self.stats.items_count.store(len, Ordering::SeqCst);
        self.stats.inserts.fetch_add(1, Ordering::SeqCst);
        drop(items);

        info!("Added rental item {} ({} items in catalog)", id, len);
        id
    }

    pub fn find_by_id(&self, id: &str) -> Option<RentalItem> {
        self.stats.lookups.fetch_add(1, Ordering::SeqCst);
        let found = catalog::find_by_id(&self.get(), id).cloned();
        if found.is_none() {
            self.stats.lookup_misses.fetch_add(1, Ordering::SeqCst);
            debug!("Rental item {} not found", id);
        }
        found
    }

    pub fn filter(&self, spec: &FilterSpec) -> Vec<RentalItem> {
        catalog::filter(&self.get(), spec)
    }

    pub fn featured(&self) -> Vec<RentalItem> {
        catalog::featured(&self.get())
    }

    pub fn display(&self, spec: &FilterSpec) -> Vec<RentalItem> {
        let shown = catalog::display(&self.get(), spec);
        debug!("Displaying {} items for {:?}", shown.len(), spec);
        shown
    }

    pub fn owned_by(&self, owner_id: &str) -> Vec<RentalItem> {
        catalog::owned_by(&self.get(), owner_id)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StoreStatsReport {
        StoreStatsReport {
            items_count: self.stats.items_count.load(Ordering::SeqCst),
            snapshot_reads: self.stats.snapshot_reads.load(Ordering::SeqCst),
            inserts: self.stats.inserts.load(Ordering::SeqCst),
            lookups: self.stats.lookups.load(Ordering::SeqCst),
            lookup_misses: self.stats.lookup_misses.load(Ordering::SeqCst),
        }
    }
}
