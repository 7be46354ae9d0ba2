//! In-memory deal registry.
//!
//! Implements `DealRegistry` for the Hub's live deals. Entries are stored
//! behind `Arc`, so a reader either sees a complete `DealMeta` or nothing.

use crate::domain::DealBookError;
use crate::ports::outbound::DealRegistry;
use parking_lot::RwLock;
use shared_types::{DealId, DealMeta};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Live map of open deals. Written by the deal lifecycle, read by the ACL.
#[derive(Debug, Default)]
pub struct DealBook {
    deals: RwLock<HashMap<DealId, Arc<DealMeta>>>,
}

impl DealBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle, ready to hand to authorizers.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a newly opened deal.
    pub fn open_deal(&self, deal_id: DealId, meta: DealMeta) -> Result<(), DealBookError> {
        let mut deals = self.deals.write();
        if deals.contains_key(&deal_id) {
            return Err(DealBookError::AlreadyOpen(deal_id));
        }

        info!(deal = %deal_id, buyer = %meta.buyer(), "Deal opened");
        deals.insert(deal_id, Arc::new(meta));
        Ok(())
    }

    /// Remove a closed deal, returning its last entry.
    pub fn close_deal(&self, deal_id: &DealId) -> Option<Arc<DealMeta>> {
        let removed = self.deals.write().remove(deal_id);
        match &removed {
            Some(_) => info!(deal = %deal_id, "Deal closed"),
            None => debug!(deal = %deal_id, "Close requested for unknown deal"),
        }
        removed
    }

    pub fn contains(&self, deal_id: &DealId) -> bool {
        self.deals.read().contains_key(deal_id)
    }

    pub fn len(&self) -> usize {
        self.deals.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DealRegistry for DealBook {
    fn lookup(&self, deal_id: &DealId) -> Option<Arc<DealMeta>> {
        self.deals.read().get(deal_id).cloned()
    }
}
