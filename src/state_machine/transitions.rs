//! # Legal Transition Table
//!
//! Pure decision functions over the order lifecycle. `can_transition`
//! answers allow/deny for a requested move, `plan_transition` additionally
//! reports the date side effect the caller must apply. Reordering inside a
//! bucket is not a transition and never reaches these functions.

use super::errors::{StateMachineError, StateMachineResult};
use super::states::OrderStatus;

/// Date side effect a legal transition implies.
///
/// The effect is computed here but applied by the caller, which owns the
/// notion of "today" and the update request carrying the changed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEffect {
    /// No date fields change; the move is a status flip only
    StatusOnly,
    /// Entering `sent`: stamp `sent_date` with today, clear `return_date`
    MarkSent,
    /// `sent` -> `returned`: stamp `return_date` with today
    MarkReturned,
    /// `sent` -> `pending` rollback: clear `sent_date` and `return_date`
    ClearShipment,
}

/// Allowed destinations for each source status
pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Sent, Canceled],
        Sent => &[Returned, Pending],
        Returned => &[Completed, Sent],
        Completed => &[Archived],
        Canceled => &[Pending],
        Archived => &[Completed],
    }
}

/// Check whether a status change is legal.
///
/// Pure and order-independent: the answer depends only on the (from, to)
/// pair. A request with `from == to` is not a transition and is denied.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Validate a requested move and compute its date side effect.
///
/// Callers must reject the move without mutating anything when this
/// returns `InvalidTransition`.
pub fn plan_transition(
    from: OrderStatus,
    to: OrderStatus,
) -> StateMachineResult<DateEffect> {
    use OrderStatus::*;

    if !can_transition(from, to) {
        return Err(StateMachineError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let effect = match (from, to) {
        (Pending, Sent) | (Returned, Sent) => DateEffect::MarkSent,
        (Sent, Returned) => DateEffect::MarkReturned,
        (Sent, Pending) => DateEffect::ClearShipment,
        _ => DateEffect::StatusOnly,
    };

    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_legal_transitions() {
        assert!(can_transition(Pending, Sent));
        assert!(can_transition(Pending, Canceled));
        assert!(can_transition(Sent, Returned));
        assert!(can_transition(Sent, Pending));
        assert!(can_transition(Returned, Completed));
        assert!(can_transition(Returned, Sent));
        assert!(can_transition(Completed, Archived));
        assert!(can_transition(Canceled, Pending));
        assert!(can_transition(Archived, Completed));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!can_transition(Pending, Returned));
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Archived, Sent));
        assert!(!can_transition(Canceled, Completed));
        assert!(!can_transition(Completed, Pending));
    }

    #[test]
    fn test_self_transition_is_denied() {
        for status in OrderStatus::ALL {
            assert!(!can_transition(status, status));
        }
    }

    #[test]
    fn test_plan_marks_shipment_dates() {
        assert_eq!(plan_transition(Pending, Sent).unwrap(), DateEffect::MarkSent);
        assert_eq!(plan_transition(Returned, Sent).unwrap(), DateEffect::MarkSent);
        assert_eq!(
            plan_transition(Sent, Returned).unwrap(),
            DateEffect::MarkReturned
        );
        assert_eq!(
            plan_transition(Sent, Pending).unwrap(),
            DateEffect::ClearShipment
        );
    }

    #[test]
    fn test_plan_status_only_flips() {
        assert_eq!(
            plan_transition(Returned, Completed).unwrap(),
            DateEffect::StatusOnly
        );
        assert_eq!(
            plan_transition(Completed, Archived).unwrap(),
            DateEffect::StatusOnly
        );
        assert_eq!(
            plan_transition(Archived, Completed).unwrap(),
            DateEffect::StatusOnly
        );
        assert_eq!(
            plan_transition(Pending, Canceled).unwrap(),
            DateEffect::StatusOnly
        );
        assert_eq!(
            plan_transition(Canceled, Pending).unwrap(),
            DateEffect::StatusOnly
        );
    }

    #[test]
    fn test_plan_rejects_illegal_move_with_context() {
        let err = plan_transition(Archived, Sent).unwrap_err();
        assert_eq!(
            err,
            StateMachineError::InvalidTransition {
                from: "archived".to_string(),
                to: "sent".to_string(),
            }
        );
    }
}
