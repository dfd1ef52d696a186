use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a prosthesis work order.
///
/// The status is the single source of truth for pipeline column placement;
/// every value except `canceled` maps to one board bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Initial state: work scheduled but not yet shipped to a laboratory
    Pending,
    /// Prosthesis is at the external laboratory
    Sent,
    /// Prosthesis came back from the laboratory
    Returned,
    /// Work delivered and closed out
    Completed,
    /// Order was canceled before completion
    Canceled,
    /// Soft terminal state for completed work taken off the active board
    Archived,
}

impl OrderStatus {
    /// All statuses, in pipeline order
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Sent,
        Self::Returned,
        Self::Completed,
        Self::Canceled,
        Self::Archived,
    ];

    /// Check if the order is still moving through the lab pipeline
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Sent | Self::Returned)
    }

    /// Check if the order is out of the active pipeline
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Archived)
    }

    /// Check if the order currently sits at the external laboratory
    pub fn is_at_laboratory(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Sent => write!(f, "sent"),
            Self::Returned => write!(f, "returned"),
            Self::Completed => write!(f, "completed"),
            Self::Canceled => write!(f, "canceled"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "returned" => Ok(Self::Returned),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

/// Default state for new orders
impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}
