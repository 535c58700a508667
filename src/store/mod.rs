//! The persisted application document and its operations.
//!
//! An [`AppData`] value mirrors the JSON blob the desktop shell persists:
//! the selected billing month, the per-month child rosters, and the
//! settings. One instance exists per open document and is passed explicitly
//! into every operation; the engine holds no global state.

pub mod migrate;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::calculation::calculate;
use crate::config::Settings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Child, InvoiceSummary, MonthKey};

/// The children enrolled for one billing month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthData {
    /// The children enrolled this month.
    #[serde(default)]
    pub children: Vec<Child>,
}

/// The outcome of copying children from one month into another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthCopyOutcome {
    /// Children newly created in the target month.
    pub copied: u32,
    /// Existing children whose attendance was updated.
    pub updated: u32,
}

/// The whole persisted application state.
///
/// Serialized with the document's historical field names (`currentMonth`,
/// `months`, `settings`), so existing documents load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    /// The currently selected billing month.
    pub current_month: MonthKey,
    /// All billing months, keyed by month.
    #[serde(default)]
    pub months: BTreeMap<MonthKey, MonthData>,
    /// Pricing, nursery, and invoice settings.
    #[serde(default)]
    pub settings: Settings,
}

impl AppData {
    /// Creates a fresh document with the given month selected and
    /// initialized.
    pub fn new(current_month: MonthKey) -> Self {
        let mut app = Self {
            current_month,
            months: BTreeMap::new(),
            settings: Settings::default(),
        };
        app.ensure_month(current_month);
        app
    }

    /// Parses a persisted document.
    ///
    /// Loading sanitizes pricing (invalid rates fall back to defaults) and
    /// migrates legacy attendance shapes; both are logged, neither fails
    /// the load.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let mut app: AppData =
            serde_json::from_str(json).map_err(|e| EngineError::DocumentParse {
                message: e.to_string(),
            })?;
        app.ensure_month(app.current_month);

        let migrated = migrate::migrate_app(&mut app);
        if migrated > 0 {
            info!(cells = migrated, "migrated legacy attendance records");
        }
        Ok(app)
    }

    /// Serializes the document for persistence.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::DocumentSerialize {
            message: e.to_string(),
        })
    }

    /// Creates the month if it does not exist yet.
    pub fn ensure_month(&mut self, month: MonthKey) {
        self.months.entry(month).or_default();
    }

    /// Adds a new billing month.
    ///
    /// Fails with [`EngineError::DuplicateMonth`] if the month already
    /// exists; otherwise the new month becomes the current one.
    pub fn add_month(&mut self, month: MonthKey) -> EngineResult<()> {
        if self.months.contains_key(&month) {
            return Err(EngineError::DuplicateMonth { month });
        }
        self.months.insert(month, MonthData::default());
        self.current_month = month;
        Ok(())
    }

    /// Selects an existing month.
    pub fn set_current_month(&mut self, month: MonthKey) -> EngineResult<()> {
        if !self.months.contains_key(&month) {
            return Err(EngineError::MonthNotFound { month });
        }
        self.current_month = month;
        Ok(())
    }

    /// Deletes a month and all attendance recorded under it.
    pub fn remove_month(&mut self, month: MonthKey) -> EngineResult<()> {
        self.months
            .remove(&month)
            .ok_or(EngineError::MonthNotFound { month })?;
        Ok(())
    }

    /// Lists the children of a month, refreshing each child's age group and
    /// allowance as of `today` first.
    pub fn list_children(&mut self, month: MonthKey, today: NaiveDate) -> &[Child] {
        let data = self.months.entry(month).or_default();
        let mut refreshed = 0u32;
        for child in &mut data.children {
            if child.refresh_entitlement(today) {
                refreshed += 1;
            }
        }
        if refreshed > 0 {
            debug!(%month, refreshed, "updated age groups on listing");
        }
        &data.children
    }

    /// Adds a child to a month's roster.
    pub fn add_child(&mut self, month: MonthKey, child: Child) {
        self.months.entry(month).or_default().children.push(child);
    }

    /// Looks up a child by id within a month.
    pub fn child(&self, month: MonthKey, id: &str) -> EngineResult<&Child> {
        self.months
            .get(&month)
            .ok_or(EngineError::MonthNotFound { month })?
            .children
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::ChildNotFound { id: id.to_string() })
    }

    /// Looks up a child mutably by id within a month.
    pub fn child_mut(&mut self, month: MonthKey, id: &str) -> EngineResult<&mut Child> {
        self.months
            .get_mut(&month)
            .ok_or(EngineError::MonthNotFound { month })?
            .children
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::ChildNotFound { id: id.to_string() })
    }

    /// Removes a child from a month's roster and returns it.
    pub fn remove_child(&mut self, month: MonthKey, id: &str) -> EngineResult<Child> {
        let data = self
            .months
            .get_mut(&month)
            .ok_or(EngineError::MonthNotFound { month })?;
        let index = data
            .children
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| EngineError::ChildNotFound { id: id.to_string() })?;
        Ok(data.children.remove(index))
    }

    /// Calculates the invoice summary for one child of a month, using the
    /// configured pricing.
    pub fn invoice_for(&self, month: MonthKey, id: &str) -> EngineResult<InvoiceSummary> {
        let child = self.child(month, id)?;
        Ok(calculate(child, month, &self.settings.pricing))
    }

    /// Calculates invoice summaries for every child of a month, in roster
    /// order.
    pub fn invoices(&self, month: MonthKey) -> Vec<(String, InvoiceSummary)> {
        self.months
            .get(&month)
            .map(|data| {
                data.children
                    .iter()
                    .map(|child| {
                        (
                            child.id.clone(),
                            calculate(child, month, &self.settings.pricing),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Copies children from a previous month into the target month.
    ///
    /// Children already present in the target (matched by name) have their
    /// attendance replaced when `copy_attendance` is set, and are left alone
    /// otherwise. Children new to the target are cloned under fresh ids;
    /// their source-month attendance is re-keyed to the target month when
    /// copying, or dropped when not.
    pub fn copy_month(
        &mut self,
        source: MonthKey,
        target: MonthKey,
        copy_attendance: bool,
    ) -> EngineResult<MonthCopyOutcome> {
        let source_children = self
            .months
            .get(&source)
            .ok_or(EngineError::MonthNotFound { month: source })?
            .children
            .clone();

        self.ensure_month(target);
        let mut outcome = MonthCopyOutcome::default();

        for source_child in source_children {
            let target_data = self.months.entry(target).or_default();
            let existing = target_data
                .children
                .iter_mut()
                .find(|c| c.name == source_child.name);

            match existing {
                Some(child) => {
                    if copy_attendance {
                        if let Some(month_data) =
                            source_child.calendar_attendance.extract_month(source)
                        {
                            child.calendar_attendance.insert_month(target, month_data);
                        }
                        outcome.updated += 1;
                    }
                }
                None => {
                    // Clone under a fresh id; the stored entitlement carries
                    // over and listing refreshes it.
                    let mut child = Child {
                        id: uuid::Uuid::new_v4().to_string(),
                        calendar_attendance: AttendanceRecord::default(),
                        legacy_attendance: None,
                        ..source_child.clone()
                    };
                    if copy_attendance {
                        if let Some(month_data) =
                            source_child.calendar_attendance.extract_month(source)
                        {
                            child.calendar_attendance.insert_month(target, month_data);
                        }
                    }
                    target_data.children.push(child);
                    outcome.copied += 1;
                }
            }
        }

        info!(
            %source,
            %target,
            copied = outcome.copied,
            updated = outcome.updated,
            "copied month roster"
        );
        Ok(outcome)
    }
}
