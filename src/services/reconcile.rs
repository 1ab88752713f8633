//! Reconciliation of desired and actual mattes across the device inventory.
//!
//! Items are processed strictly in the order the device listed them, one
//! command at a time. Each item ends in exactly one [`ItemOutcome`]; a
//! rejected command or a malformed record is recorded and the loop moves on.
//! Nothing is rolled back: items changed before a failure stay changed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::device::{ArtDevice, MatteChange};
use crate::error::{MatteError, MatteResult};
use crate::models::{ArtworkItem, MalformedItem, MatteId, MatteRequest, Orientation};
use crate::services::resolver::{resolve_target, MatteWarning};

/// Options for a reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Compute changes without sending them
    pub dry_run: bool,
}

/// What a single item needs, computed without touching the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPlan {
    /// The record lacks matte fields
    Malformed(MalformedItem),
    /// Desired and current mattes already match
    Skip {
        /// Requests that could not be applied to this item
        warnings: Vec<MatteWarning>,
    },
    /// A change command is needed
    Change {
        /// The command to send
        change: MatteChange,
        /// Requests that could not be applied to this item
        warnings: Vec<MatteWarning>,
    },
}

/// Works out what `item` needs for the given landscape and portrait requests.
pub fn plan_item(
    item: &ArtworkItem,
    landscape: &MatteRequest,
    portrait: &MatteRequest,
) -> ItemPlan {
    let snapshot = match item.snapshot() {
        Ok(snapshot) => snapshot,
        Err(malformed) => return ItemPlan::Malformed(malformed),
    };

    let landscape_target = resolve_target(
        landscape,
        &snapshot.landscape,
        Orientation::Landscape,
        &snapshot.content_id,
    );
    let portrait_target = resolve_target(
        portrait,
        &snapshot.portrait,
        Orientation::Portrait,
        &snapshot.content_id,
    );

    let warnings: Vec<MatteWarning> = [landscape_target.warning, portrait_target.warning]
        .into_iter()
        .flatten()
        .collect();

    let portrait_changed = portrait_target.target != snapshot.portrait;
    if landscape_target.target == snapshot.landscape && !portrait_changed {
        return ItemPlan::Skip { warnings };
    }

    ItemPlan::Change {
        change: MatteChange {
            content_id: snapshot.content_id,
            landscape: landscape_target.target,
            portrait: portrait_changed.then_some(portrait_target.target),
        },
        warnings,
    }
}

/// Final state of one item after a reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// The device accepted the change
    Changed {
        /// Landscape matte sent
        landscape: MatteId,
        /// Portrait matte sent, if it changed
        portrait: Option<MatteId>,
    },
    /// Dry run: the change that would have been sent
    Planned {
        /// Landscape matte to send
        landscape: MatteId,
        /// Portrait matte to send, if it changes
        portrait: Option<MatteId>,
    },
    /// Nothing to do
    Skipped,
    /// The device refused the change
    Rejected {
        /// Landscape matte attempted
        landscape: MatteId,
        /// Portrait matte attempted, if it changed
        portrait: Option<MatteId>,
        /// Device error code
        code: String,
    },
    /// The record lacked matte fields
    Malformed {
        /// Missing field names
        missing: Vec<&'static str>,
    },
}

/// Report entry for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    /// Content id, or a placeholder for records without one
    pub item: String,
    /// "WxH" when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// What happened
    #[serde(flatten)]
    pub outcome: ItemOutcome,
    /// Requests that could not be applied to this item
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MatteWarning>,
}

/// Per-outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Items inspected
    pub total: usize,
    /// Items changed on the device
    pub changed: usize,
    /// Items that would change (dry run)
    pub planned: usize,
    /// Items already in the desired state
    pub skipped: usize,
    /// Items whose change was refused
    pub rejected: usize,
    /// Items with incomplete records
    pub malformed: usize,
    /// Warnings raised across all items
    pub warnings: usize,
}

/// Result of a reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// When the pass started
    pub started_at: DateTime<Utc>,
    /// When the pass finished
    pub finished_at: DateTime<Utc>,
    /// Whether commands were withheld
    pub dry_run: bool,
    /// One entry per item, in device order
    pub items: Vec<ItemReport>,
}

impl ReconcileReport {
    /// Counts items per outcome.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total: self.items.len(),
            ..ReportSummary::default()
        };
        for item in &self.items {
            summary.warnings += item.warnings.len();
            match item.outcome {
                ItemOutcome::Changed { .. } => summary.changed += 1,
                ItemOutcome::Planned { .. } => summary.planned += 1,
                ItemOutcome::Skipped => summary.skipped += 1,
                ItemOutcome::Rejected { .. } => summary.rejected += 1,
                ItemOutcome::Malformed { .. } => summary.malformed += 1,
            }
        }
        summary
    }

    /// Looks up the report entry for a content id.
    #[must_use]
    pub fn item(&self, content_id: &str) -> Option<&ItemReport> {
        self.items.iter().find(|item| item.item == content_id)
    }
}

/// Brings every item in `items` to the requested mattes.
///
/// # Errors
///
/// Rejections and malformed records are recorded in the report. Any other
/// device failure ends the pass with [`MatteError::Device`].
pub async fn reconcile<D>(
    device: &mut D,
    items: &[ArtworkItem],
    landscape: &MatteRequest,
    portrait: &MatteRequest,
    options: ReconcileOptions,
) -> MatteResult<ReconcileReport>
where
    D: ArtDevice + ?Sized,
{
    let started_at = Utc::now();
    let mut reports = Vec::with_capacity(items.len());

    for item in items {
        let dimensions = item.dimensions();
        let (outcome, warnings) = match plan_item(item, landscape, portrait) {
            ItemPlan::Malformed(malformed) => {
                warn!("{malformed}");
                (
                    ItemOutcome::Malformed {
                        missing: malformed.missing,
                    },
                    Vec::new(),
                )
            }
            ItemPlan::Skip { warnings } => {
                log_warnings(&warnings);
                (ItemOutcome::Skipped, warnings)
            }
            ItemPlan::Change { change, warnings } => {
                log_warnings(&warnings);
                let outcome =
                    apply_change(&mut *device, change, dimensions.as_deref(), options).await?;
                (outcome, warnings)
            }
        };

        reports.push(ItemReport {
            item: item.label().to_string(),
            dimensions,
            outcome,
            warnings,
        });
    }

    Ok(ReconcileReport {
        started_at,
        finished_at: Utc::now(),
        dry_run: options.dry_run,
        items: reports,
    })
}

async fn apply_change<D>(
    device: &mut D,
    change: MatteChange,
    dimensions: Option<&str>,
    options: ReconcileOptions,
) -> MatteResult<ItemOutcome>
where
    D: ArtDevice + ?Sized,
{
    let portrait_note = change
        .portrait
        .as_ref()
        .map(|portrait| format!(" and portrait matte to {portrait}"))
        .unwrap_or_default();

    if options.dry_run {
        info!(
            "Would set landscape matte to {}{} for {}",
            change.landscape, portrait_note, change.content_id
        );
        return Ok(ItemOutcome::Planned {
            landscape: change.landscape,
            portrait: change.portrait,
        });
    }

    info!(
        "Setting landscape matte to {}{} for {}",
        change.landscape, portrait_note, change.content_id
    );

    match device.change_matte(&change).await {
        Ok(()) => Ok(ItemOutcome::Changed {
            landscape: change.landscape,
            portrait: change.portrait,
        }),
        Err(crate::device::DeviceError::Rejected { code, .. }) => {
            let portrait = change
                .portrait
                .as_ref()
                .map_or_else(|| "unchanged".to_string(), ToString::to_string);
            warn!(
                "Unable to change mats to {}/{} for {} ({}), error code {}",
                change.landscape,
                portrait,
                change.content_id,
                dimensions.unwrap_or("unknown size"),
                code
            );
            Ok(ItemOutcome::Rejected {
                landscape: change.landscape,
                portrait: change.portrait,
                code,
            })
        }
        Err(err) => Err(MatteError::Device(err)),
    }
}

fn log_warnings(warnings: &[MatteWarning]) {
    for warning in warnings {
        warn!("{warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{MatteList, MockArtDevice};
    use crate::models::{MatteColor, MatteType};

    fn item(id: &str, landscape: &str, portrait: &str) -> ArtworkItem {
        ArtworkItem {
            content_id: Some(id.into()),
            category_id: Some("MY-C0002".into()),
            matte_id: Some(landscape.into()),
            portrait_matte_id: Some(portrait.into()),
            width: Some(1920),
            height: Some(1080),
        }
    }

    fn mock(items: Vec<ArtworkItem>) -> MockArtDevice {
        MockArtDevice::new(
            MatteList::from_tokens(["frame", "shadowbox"], ["white", "black"]),
            items,
        )
    }

    fn black() -> MatteRequest {
        MatteRequest::with_color(MatteColor::new("black"))
    }

    #[test]
    fn test_plan_skip_when_equal() {
        let plan = plan_item(
            &item("A", "frame_white", "none"),
            &MatteRequest::default(),
            &MatteRequest::default(),
        );
        assert_eq!(plan, ItemPlan::Skip { warnings: vec![] });
    }

    #[test]
    fn test_plan_portrait_only_change_resends_landscape() {
        let plan = plan_item(
            &item("A", "frame_white", "frame_white"),
            &MatteRequest::default(),
            &MatteRequest::ExplicitNone,
        );
        match plan {
            ItemPlan::Change { change, warnings } => {
                assert_eq!(change.landscape.as_str(), "frame_white");
                assert_eq!(change.portrait, Some(MatteId::none()));
                assert!(warnings.is_empty());
            }
            other => panic!("expected change, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_unchanged_portrait_is_unset() {
        let plan = plan_item(
            &item("A", "frame_white", "shadowbox_black"),
            &black(),
            &MatteRequest::default(),
        );
        match plan {
            ItemPlan::Change { change, .. } => {
                assert_eq!(change.landscape.as_str(), "frame_black");
                assert_eq!(change.portrait, None);
            }
            other => panic!("expected change, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_malformed() {
        let mut broken = item("A", "none", "none");
        broken.portrait_matte_id = None;
        assert!(matches!(
            plan_item(&broken, &black(), &black()),
            ItemPlan::Malformed(_)
        ));
    }

    #[tokio::test]
    async fn test_reconcile_scenario() {
        let items = vec![item("A", "frame_white", "none"), item("B", "none", "none")];
        let mut device = mock(items.clone());

        let report = reconcile(
            &mut device,
            &items,
            &black(),
            &MatteRequest::default(),
            ReconcileOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            device.changes,
            vec![MatteChange {
                content_id: "A".into(),
                landscape: MatteId::from_device("frame_black"),
                portrait: None,
            }]
        );

        let b = report.item("B").unwrap();
        assert_eq!(b.outcome, ItemOutcome::Skipped);
        assert_eq!(b.warnings.len(), 1);
        assert_eq!(b.warnings[0].orientation, Orientation::Landscape);

        let summary = report.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.warnings, 1);
    }

    #[tokio::test]
    async fn test_rejection_does_not_stop_loop() {
        let items = vec![item("A", "frame_white", "none"), item("B", "shadowbox_white", "none")];
        let mut device = mock(items.clone()).reject("A", "-1");

        let report = reconcile(
            &mut device,
            &items,
            &black(),
            &MatteRequest::default(),
            ReconcileOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(device.changes.len(), 2);
        assert!(matches!(
            report.item("A").unwrap().outcome,
            ItemOutcome::Rejected { ref code, .. } if code == "-1"
        ));
        assert!(matches!(
            report.item("B").unwrap().outcome,
            ItemOutcome::Changed { .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_does_not_stop_loop() {
        let mut broken = item("A", "frame_white", "none");
        broken.matte_id = None;
        let items = vec![broken, item("B", "frame_white", "none")];
        let mut device = mock(items.clone());

        let report = reconcile(
            &mut device,
            &items,
            &MatteRequest::ExplicitNone,
            &MatteRequest::default(),
            ReconcileOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            report.items[0].outcome,
            ItemOutcome::Malformed {
                missing: vec!["matte_id"]
            }
        );
        assert_eq!(device.changes.len(), 1);
        assert_eq!(device.changes[0].content_id, "B");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let items = vec![item("A", "frame_white", "none"), item("B", "frame_white", "none")];
        let mut device = mock(items.clone());
        device.disconnect_on = Some("A".into());

        let err = reconcile(
            &mut device,
            &items,
            &MatteRequest::ExplicitNone,
            &MatteRequest::default(),
            ReconcileOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MatteError::Device(_)));
        assert_eq!(device.changes.len(), 1);
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing() {
        let items = vec![item("A", "frame_white", "none")];
        let mut device = mock(items.clone());

        let report = reconcile(
            &mut device,
            &items,
            &MatteRequest::with_type(MatteType::new("shadowbox")),
            &MatteRequest::default(),
            ReconcileOptions { dry_run: true },
        )
        .await
        .unwrap();

        assert!(device.changes.is_empty());
        assert!(report.dry_run);
        assert_eq!(
            report.items[0].outcome,
            ItemOutcome::Planned {
                landscape: MatteId::from_device("shadowbox_white"),
                portrait: None,
            }
        );
    }

    #[tokio::test]
    async fn test_order_follows_device() {
        let items = vec![
            item("C", "frame_white", "none"),
            item("A", "frame_white", "none"),
            item("B", "frame_white", "none"),
        ];
        let mut device = mock(items.clone());

        let report = reconcile(
            &mut device,
            &items,
            &MatteRequest::ExplicitNone,
            &MatteRequest::default(),
            ReconcileOptions::default(),
        )
        .await
        .unwrap();

        let sent: Vec<&str> = device.changes.iter().map(|c| c.content_id.as_str()).collect();
        assert_eq!(sent, vec!["C", "A", "B"]);
        let reported: Vec<&str> = report.items.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(reported, vec!["C", "A", "B"]);
    }
}
