//! # Order Store Collaborator
//!
//! The persisted order record lives outside this core. This module defines
//! the lookup contract the subscription channel consumes when it is
//! configured to verify track requests, plus an in-memory implementation for
//! tests and standalone embedding.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackingError};
use crate::messaging::OrderId;
use crate::state_machine::OrderStatus;

/// The slice of the persisted order document this core reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    /// Owning principal, when the order was placed by an authenticated user.
    pub owner: Option<String>,
    pub status: OrderStatus,
}

impl OrderRecord {
    pub fn new(order_id: OrderId, owner: Option<String>) -> Self {
        Self {
            order_id,
            owner,
            status: OrderStatus::default(),
        }
    }
}

/// Lookup/update contract against the external order store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Find an order, scoped to an owning principal when one is supplied.
    ///
    /// Returns `None` when the order does not exist or is not visible to the
    /// requester. Orders with an owner are only visible to that owner; an
    /// anonymous requester never sees an owned order.
    async fn find_order(
        &self,
        order_id: &OrderId,
        owner: Option<&str>,
    ) -> Result<Option<OrderRecord>>;

    /// Persist a new status for an order.
    async fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<()>;
}

/// Thread-safe in-memory store for tests and standalone embedding.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: DashMap<OrderId, OrderRecord>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: OrderRecord) {
        self.orders.insert(record.order_id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_order(
        &self,
        order_id: &OrderId,
        owner: Option<&str>,
    ) -> Result<Option<OrderRecord>> {
        let record = match self.orders.get(order_id) {
            Some(record) => record.value().clone(),
            None => return Ok(None),
        };

        match (&record.owner, owner) {
            (Some(record_owner), Some(requester)) if record_owner != requester => Ok(None),
            (Some(_), None) => Ok(None),
            _ => Ok(Some(record)),
        }
    }

    async fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<()> {
        match self.orders.get_mut(order_id) {
            Some(mut record) => {
                record.status = status;
                Ok(())
            }
            None => Err(TrackingError::UnknownOrder {
                order_id: order_id.to_string(),
            }),
        }
    }
}
