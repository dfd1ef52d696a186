//! Bucket projection over the canonical order list.

use crate::board::BoardFilters;
use crate::models::ProsthesisOrder;
use crate::sla;
use crate::state_machine::OrderStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// The five statuses rendered as board columns. `canceled` orders exist
/// in the canonical list but have no column.
pub const BOARD_STATUSES: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Sent,
    OrderStatus::Returned,
    OrderStatus::Completed,
    OrderStatus::Archived,
];

/// One projected board: five ordered buckets of owned order snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub pending: Vec<ProsthesisOrder>,
    pub sent: Vec<ProsthesisOrder>,
    pub returned: Vec<ProsthesisOrder>,
    pub completed: Vec<ProsthesisOrder>,
    pub archived: Vec<ProsthesisOrder>,
}

impl Board {
    /// The bucket for a status, or `None` for `canceled`
    pub fn bucket(&self, status: OrderStatus) -> Option<&Vec<ProsthesisOrder>> {
        match status {
            OrderStatus::Pending => Some(&self.pending),
            OrderStatus::Sent => Some(&self.sent),
            OrderStatus::Returned => Some(&self.returned),
            OrderStatus::Completed => Some(&self.completed),
            OrderStatus::Archived => Some(&self.archived),
            OrderStatus::Canceled => None,
        }
    }

    fn bucket_mut(&mut self, status: OrderStatus) -> Option<&mut Vec<ProsthesisOrder>> {
        match status {
            OrderStatus::Pending => Some(&mut self.pending),
            OrderStatus::Sent => Some(&mut self.sent),
            OrderStatus::Returned => Some(&mut self.returned),
            OrderStatus::Completed => Some(&mut self.completed),
            OrderStatus::Archived => Some(&mut self.archived),
            OrderStatus::Canceled => None,
        }
    }

    /// Total orders across all buckets
    pub fn len(&self) -> usize {
        BOARD_STATUSES
            .iter()
            .filter_map(|s| self.bucket(*s))
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Does the order satisfy every per-order selector? Delay and the
/// returned-only rule are bucket-level concerns handled in [`project`].
fn matches_selectors(order: &ProsthesisOrder, filters: &BoardFilters) -> bool {
    if let Some(professional) = filters.professional {
        if order.professional_id != professional {
            return false;
        }
    }
    if let Some(laboratory) = &filters.laboratory {
        if order.laboratory.as_deref() != Some(laboratory.as_str()) {
            return false;
        }
    }
    if let Some(label) = &filters.label {
        if !order.has_label(label) {
            return false;
        }
    }
    true
}

/// Project the canonical list into filtered buckets as of `today`.
///
/// Input order is preserved within each bucket. `delayed_only` narrows
/// the `sent` bucket alone; `returned_only` empties `pending` and `sent`
/// wholesale while leaving the downstream buckets untouched.
pub fn project(orders: &[ProsthesisOrder], filters: &BoardFilters, today: NaiveDate) -> Board {
    let mut board = Board::default();

    for order in orders {
        let Some(bucket) = board.bucket_mut(order.status) else {
            continue;
        };
        if !matches_selectors(order, filters) {
            continue;
        }
        if filters.delayed_only
            && order.status == OrderStatus::Sent
            && !sla::is_delayed(order, today)
        {
            continue;
        }
        bucket.push(order.clone());
    }

    if filters.returned_only {
        board.pending.clear();
        board.sent.clear();
    }

    board
}
