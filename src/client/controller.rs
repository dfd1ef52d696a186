//! # Workflow Controller
//!
//! Keeps an optimistic local copy of the canonical order list, projects
//! it into board buckets through the active filters, and orchestrates
//! moves against the server.
//!
//! ## Concurrency rules
//!
//! - Moves are serialized per order id: a second move on an order whose
//!   previous move is still in flight is rejected immediately. Moves on
//!   different orders run concurrently.
//! - Illegal transitions are rejected locally; no request is issued and
//!   the local view is unchanged.
//! - A failed mutation rolls the local view back to its pre-attempt
//!   snapshot.
//! - Every confirmed move ends in a refetch of the canonical list; the
//!   optimistic patch is never the final word.
//! - Refreshes are generation-stamped and a refresh result is only
//!   applied when no newer refresh has landed, so the freshest refetch
//!   always wins when they race.

use chrono::{Local, NaiveDate};
use dashmap::DashSet;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{project, Board, BoardFilters};
use crate::client::api_client::ProsthesisApiClient;
use crate::client::ClientError;
use crate::logging::log_board_operation;
use crate::models::{NewProsthesisOrder, ProsthesisOrder, ProsthesisOrderUpdate};
use crate::state_machine::{plan_transition, DateEffect, OrderStatus, StateMachineError};

/// Errors surfaced by controller operations
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    InvalidTransition(#[from] StateMachineError),

    #[error("Order {order_id} not found in the local view")]
    UnknownOrder { order_id: i64 },

    #[error("Order {order_id} already has a move in flight")]
    MoveInFlight { order_id: i64 },

    #[error("Reorder indices out of range: {from_index} -> {to_index}")]
    InvalidReorder { from_index: usize, to_index: usize },

    #[error(transparent)]
    Api(#[from] ClientError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Default)]
struct ControllerState {
    orders: Vec<ProsthesisOrder>,
    filters: BoardFilters,
    /// Generation of the refresh most recently applied
    applied_generation: u64,
}

/// Board controller over the prosthesis API
pub struct WorkflowController {
    client: Arc<ProsthesisApiClient>,
    state: RwLock<ControllerState>,
    in_flight: DashSet<i64>,
    refresh_generation: AtomicU64,
}

/// Removes the order id from the in-flight set when the move resolves,
/// on every exit path.
struct InFlightGuard<'a> {
    set: &'a DashSet<i64>,
    order_id: i64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.order_id);
    }
}

impl WorkflowController {
    pub fn new(client: ProsthesisApiClient) -> Self {
        Self {
            client: Arc::new(client),
            state: RwLock::new(ControllerState::default()),
            in_flight: DashSet::new(),
            refresh_generation: AtomicU64::new(0),
        }
    }

    /// Refetch the canonical list from the server. When refreshes race,
    /// only the newest one's result is applied.
    pub async fn refresh(&self) -> ControllerResult<()> {
        let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let orders = self.client.list_orders().await?;

        let mut state = self.state.write();
        if generation <= state.applied_generation {
            debug!(
                generation = generation,
                applied = state.applied_generation,
                "Discarding stale refresh result"
            );
            return Ok(());
        }
        state.applied_generation = generation;
        state.orders = orders;
        info!(
            generation = generation,
            order_count = state.orders.len(),
            "Applied canonical list refresh"
        );
        Ok(())
    }

    /// Replace the local canonical list without a server round trip.
    /// Useful for bootstrapping from state fetched elsewhere.
    pub fn seed_orders(&self, orders: Vec<ProsthesisOrder>) {
        self.state.write().orders = orders;
    }

    /// Replace the active filter set. The next [`board`] call reflects it.
    pub fn set_filters(&self, filters: BoardFilters) {
        self.state.write().filters = filters;
    }

    pub fn filters(&self) -> BoardFilters {
        self.state.read().filters.clone()
    }

    /// Snapshot of the local canonical list
    pub fn orders(&self) -> Vec<ProsthesisOrder> {
        self.state.read().orders.clone()
    }

    /// Project the current local view into filtered buckets as of `today`
    pub fn board_at(&self, today: NaiveDate) -> Board {
        let state = self.state.read();
        project(&state.orders, &state.filters, today)
    }

    /// [`board_at`] against the local date
    pub fn board(&self) -> Board {
        self.board_at(Local::now().date_naive())
    }

    /// Move an order to another bucket.
    ///
    /// The transition is validated against the local copy first; an
    /// illegal move never reaches the network. The local view is updated
    /// optimistically, reconciled with the server's response, and then
    /// re-derived from a full refetch; a failed request rolls the local
    /// view back instead.
    pub async fn move_order(
        &self,
        order_id: i64,
        target: OrderStatus,
    ) -> ControllerResult<ProsthesisOrder> {
        if !self.in_flight.insert(order_id) {
            return Err(ControllerError::MoveInFlight { order_id });
        }
        let _guard = InFlightGuard {
            set: &self.in_flight,
            order_id,
        };

        // Validate and apply the optimistic move under the write lock
        let snapshot = {
            let mut state = self.state.write();
            let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) else {
                return Err(ControllerError::UnknownOrder { order_id });
            };

            let from = order.status;
            let effect = plan_transition(from, target)?;
            let snapshot = order.clone();

            order.status = target;
            apply_date_effect_local(order, effect);

            log_board_operation(
                "move",
                Some(order_id),
                Some(&from.to_string()),
                Some(&target.to_string()),
                Some("optimistic"),
            );
            snapshot
        };

        let update = ProsthesisOrderUpdate {
            status: Some(target),
            ..Default::default()
        };

        match self.client.update_order(order_id, &update).await {
            Ok(authoritative) => {
                {
                    let mut state = self.state.write();
                    if let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) {
                        *order = authoritative.clone();
                    }
                }
                log_board_operation(
                    "move",
                    Some(order_id),
                    Some(&snapshot.status.to_string()),
                    Some(&authoritative.status.to_string()),
                    Some("confirmed"),
                );

                // The optimistic patch is not kept verbatim: the next
                // read is authoritative, so every confirmed move ends in
                // a full refetch of the canonical list
                drop(_guard);
                self.refresh().await?;
                Ok(authoritative)
            }
            Err(ClientError::NotFound) => {
                warn!(order_id = order_id, "Order vanished during move, refreshing");
                self.rollback(order_id, snapshot);
                drop(_guard);
                self.refresh().await?;
                Err(ControllerError::Api(ClientError::NotFound))
            }
            Err(e) => {
                warn!(order_id = order_id, error = %e, "Move failed, rolling back");
                self.rollback(order_id, snapshot);
                Err(ControllerError::Api(e))
            }
        }
    }

    fn rollback(&self, order_id: i64, snapshot: ProsthesisOrder) {
        let mut state = self.state.write();
        if let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) {
            *order = snapshot;
        }
    }

    /// Reposition an order within its own bucket. Purely local; ordering
    /// inside a bucket is not authoritative and a refresh may reset it.
    pub fn reorder_in_bucket(
        &self,
        status: OrderStatus,
        from_index: usize,
        to_index: usize,
    ) -> ControllerResult<()> {
        let mut state = self.state.write();

        let positions: Vec<usize> = state
            .orders
            .iter()
            .enumerate()
            .filter(|(_, o)| o.status == status)
            .map(|(i, _)| i)
            .collect();

        if from_index >= positions.len() || to_index >= positions.len() {
            return Err(ControllerError::InvalidReorder {
                from_index,
                to_index,
            });
        }

        // Reorder within the bucket's own sequence, then write the bucket
        // back into the same flat slots
        let mut bucket: Vec<ProsthesisOrder> = positions
            .iter()
            .map(|&i| state.orders[i].clone())
            .collect();
        let moved = bucket.remove(from_index);
        bucket.insert(to_index, moved);
        for (&slot, order) in positions.iter().zip(bucket) {
            state.orders[slot] = order;
        }
        Ok(())
    }

    /// Create an order. Status is forced to `pending` locally as well as
    /// server-side; a laboratory name is resolved against the registry
    /// before submission.
    pub async fn create_order(
        &self,
        mut new_order: NewProsthesisOrder,
    ) -> ControllerResult<ProsthesisOrder> {
        new_order.status = None;

        if let Some(name) = &new_order.laboratory {
            if name.trim().is_empty() {
                new_order.laboratory = None;
            } else {
                let lab = self.client.resolve_laboratory(name).await?;
                new_order.laboratory = Some(lab.name);
            }
        }

        let order = self.client.create_order(&new_order).await?;
        self.state.write().orders.insert(0, order.clone());

        log_board_operation(
            "create",
            Some(order.id),
            None,
            Some(&order.status.to_string()),
            Some("stored"),
        );
        Ok(order)
    }

    /// Edit an order's details without changing its status. Any status
    /// carried by the patch is discarded; transitions go through
    /// [`move_order`].
    pub async fn update_order_details(
        &self,
        order_id: i64,
        mut update: ProsthesisOrderUpdate,
    ) -> ControllerResult<ProsthesisOrder> {
        update.status = None;

        if let Some(name) = &update.laboratory {
            if !name.trim().is_empty() {
                let lab = self.client.resolve_laboratory(name).await?;
                update.laboratory = Some(lab.name);
            }
        }

        match self.client.update_order(order_id, &update).await {
            Ok(order) => {
                let mut state = self.state.write();
                if let Some(existing) = state.orders.iter_mut().find(|o| o.id == order_id) {
                    *existing = order.clone();
                }
                Ok(order)
            }
            Err(ClientError::NotFound) => {
                warn!(order_id = order_id, "Order not found for edit, refreshing");
                self.refresh().await?;
                Err(ControllerError::Api(ClientError::NotFound))
            }
            Err(e) => Err(ControllerError::Api(e)),
        }
    }

    /// Shortcut for `completed -> archived`
    pub async fn archive(&self, order_id: i64) -> ControllerResult<ProsthesisOrder> {
        self.move_order(order_id, OrderStatus::Archived).await
    }

    /// Shortcut for `archived -> completed`
    pub async fn unarchive(&self, order_id: i64) -> ControllerResult<ProsthesisOrder> {
        self.move_order(order_id, OrderStatus::Completed).await
    }

    /// Shortcut for `pending -> canceled`
    pub async fn cancel(&self, order_id: i64) -> ControllerResult<ProsthesisOrder> {
        self.move_order(order_id, OrderStatus::Canceled).await
    }

    /// Delete an order and drop it from the local view
    pub async fn delete_order(&self, order_id: i64) -> ControllerResult<()> {
        match self.client.delete_order(order_id).await {
            Ok(()) => {
                self.state.write().orders.retain(|o| o.id != order_id);
                info!(order_id = order_id, "Deleted order");
                Ok(())
            }
            Err(ClientError::NotFound) => {
                self.refresh().await?;
                Err(ControllerError::Api(ClientError::NotFound))
            }
            Err(e) => Err(ControllerError::Api(e)),
        }
    }
}

/// Mirror of the server-side date effects, applied to the optimistic copy
fn apply_date_effect_local(order: &mut ProsthesisOrder, effect: DateEffect) {
    let today = Local::now().date_naive();
    match effect {
        DateEffect::StatusOnly => {}
        DateEffect::MarkSent => {
            if order.sent_date.is_none() {
                order.sent_date = Some(today);
            }
            order.return_date = None;
        }
        DateEffect::MarkReturned => {
            if order.return_date.is_none() {
                order.return_date = Some(today);
            }
        }
        DateEffect::ClearShipment => {
            order.sent_date = None;
            order.return_date = None;
        }
    }
}
