//! Attendance status values and the toggle cycle.

use serde::{Deserialize, Serialize};

/// The attendance status of one (day, slot) cell.
///
/// Exactly one status applies to each (child, month, day, slot) tuple at any
/// time; `None` is the implicit default for cells that were never touched.
///
/// # Example
///
/// ```
/// use invoice_engine::models::AttendanceStatus;
///
/// let s = AttendanceStatus::None;
/// assert_eq!(s.next(), AttendanceStatus::Paid);
/// assert_eq!(s.next().next(), AttendanceStatus::Free);
/// assert_eq!(s.next().next().next(), AttendanceStatus::None);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Not attending.
    #[default]
    None,
    /// Attending as a billable session.
    Paid,
    /// Attending under the funded-hours entitlement; billed at zero.
    Free,
}

impl AttendanceStatus {
    /// Advances the status along the toggle cycle
    /// `None -> Paid -> Free -> None`.
    ///
    /// The transition is unconditional: remaining entitlement is never
    /// consulted here.
    pub fn next(self) -> Self {
        match self {
            AttendanceStatus::None => AttendanceStatus::Paid,
            AttendanceStatus::Paid => AttendanceStatus::Free,
            AttendanceStatus::Free => AttendanceStatus::None,
        }
    }

    /// Returns true for `Paid` and `Free`, false for `None`.
    pub fn is_attending(self) -> bool {
        !matches!(self, AttendanceStatus::None)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::None => write!(f, "none"),
            AttendanceStatus::Paid => write!(f, "paid"),
            AttendanceStatus::Free => write!(f, "free"),
        }
    }
}
