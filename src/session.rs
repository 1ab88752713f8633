//! One matte run against a device.
//!
//! The run is strictly sequential: art support probe, capability catalog,
//! parsing of both matte specifications, inventory, then the reconcile loop.
//! Setup failures end the run before any item is touched. The device is
//! closed on every exit path, including interruption.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::device::{ArtDevice, DeviceError};
use crate::error::{MatteError, MatteResult};
use crate::models::MatteCatalog;
use crate::parser::parse_matte_spec;
use crate::services::{reconcile, ReconcileOptions, ReconcileReport};

/// Inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Landscape matte specification, `None` to leave landscape alone
    pub landscape: Option<String>,
    /// Portrait matte specification, `None` to leave portrait alone
    pub portrait: Option<String>,
    /// Category to list, `None` for all art
    pub category: Option<String>,
    /// How long to wait for the artwork list
    pub list_timeout: Duration,
    /// Compute changes without sending them
    pub dry_run: bool,
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The display has no art mode; nothing was done
    Unsupported,
    /// The reconcile loop ran to the end
    Completed {
        /// Catalog the specifications were checked against
        catalog: MatteCatalog,
        /// Per-item results
        report: ReconcileReport,
    },
}

/// Runs the matte pipeline against `device` without closing it.
pub async fn run<D>(device: &mut D, options: &SessionOptions) -> MatteResult<RunOutcome>
where
    D: ArtDevice + ?Sized,
{
    info!("getting tv info");
    let supported = device
        .is_art_supported()
        .await
        .map_err(MatteError::CapabilityFetch)?;
    info!("art mode is supported: {supported}");
    if !supported {
        return Ok(RunOutcome::Unsupported);
    }

    let catalog: MatteCatalog = device
        .matte_list(true)
        .await
        .map_err(MatteError::CapabilityFetch)?
        .into();
    if catalog.is_empty() {
        return Err(MatteError::CapabilityFetch(DeviceError::Protocol(
            "device reported no matte types or colors".into(),
        )));
    }
    debug!(
        "matte types: {:?}, colors: {:?}",
        catalog.types(),
        catalog.colors()
    );

    let landscape = parse_matte_spec(options.landscape.as_deref(), &catalog)?;
    let portrait = parse_matte_spec(options.portrait.as_deref(), &catalog)?;
    debug!("landscape request: {landscape}, portrait request: {portrait}");

    let items = device
        .list_artwork(options.category.as_deref(), options.list_timeout)
        .await
        .map_err(MatteError::Inventory)?;
    info!(
        "found {} artwork items in {}",
        items.len(),
        options.category.as_deref().unwrap_or("all categories")
    );

    let report = reconcile(
        device,
        &items,
        &landscape,
        &portrait,
        ReconcileOptions {
            dry_run: options.dry_run,
        },
    )
    .await?;

    Ok(RunOutcome::Completed { catalog, report })
}

/// Runs the pipeline until it finishes or `shutdown` resolves, then closes
/// the device either way.
///
/// # Errors
///
/// Returns [`MatteError::Interrupted`] when `shutdown` wins; items already
/// changed stay changed.
pub async fn run_until<D, F>(
    device: &mut D,
    options: &SessionOptions,
    shutdown: F,
) -> MatteResult<RunOutcome>
where
    D: ArtDevice + ?Sized,
    F: Future<Output = ()>,
{
    let result = tokio::select! {
        biased;
        () = shutdown => {
            warn!("interrupted, abandoning remaining work");
            Err(MatteError::Interrupted)
        }
        result = run(&mut *device, options) => result,
    };

    if let Err(err) = device.close().await {
        warn!("failed to close device connection: {err}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{MatteList, MockArtDevice};
    use crate::models::ArtworkItem;

    fn options(landscape: Option<&str>) -> SessionOptions {
        SessionOptions {
            landscape: landscape.map(str::to_string),
            portrait: None,
            category: Some("MY-C0002".into()),
            list_timeout: Duration::from_secs(10),
            dry_run: false,
        }
    }

    fn device() -> MockArtDevice {
        MockArtDevice::new(
            MatteList::from_tokens(["frame", "shadowbox"], ["white", "black"]),
            vec![ArtworkItem {
                content_id: Some("MY_F0001".into()),
                category_id: Some("MY-C0002".into()),
                matte_id: Some("frame_white".into()),
                portrait_matte_id: Some("none".into()),
                ..ArtworkItem::default()
            }],
        )
    }

    #[tokio::test]
    async fn test_unsupported_does_nothing_else() {
        let mut device = device();
        device.supported = false;

        let outcome = run_until(&mut device, &options(Some("none")), std::future::pending())
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::Unsupported);
        assert!(device.listed_categories.is_empty());
        assert!(device.changes.is_empty());
        assert!(device.is_closed());
    }

    #[tokio::test]
    async fn test_validation_failure_aborts_before_inventory() {
        let mut device = device();

        let err = run_until(&mut device, &options(Some("teal")), std::future::pending())
            .await
            .unwrap_err();

        assert!(matches!(err, MatteError::Validation(_)));
        assert!(device.listed_categories.is_empty());
        assert!(device.changes.is_empty());
        assert!(device.is_closed());
    }

    #[tokio::test]
    async fn test_capability_failure_is_fatal() {
        let mut device = device();
        device.fail_matte_list = true;

        let err = run_until(&mut device, &options(Some("none")), std::future::pending())
            .await
            .unwrap_err();

        assert!(matches!(err, MatteError::CapabilityFetch(_)));
        assert!(device.is_closed());
    }

    #[tokio::test]
    async fn test_empty_catalog_is_capability_failure() {
        let mut device = device();
        device.matte_list = MatteList::default();

        let err = run_until(&mut device, &options(Some("none")), std::future::pending())
            .await
            .unwrap_err();

        assert!(matches!(err, MatteError::CapabilityFetch(DeviceError::Protocol(_))));
        assert!(device.listed_categories.is_empty());
        assert!(device.is_closed());
    }

    #[tokio::test]
    async fn test_completed_run_reports() {
        let mut device = device();

        let outcome = run_until(&mut device, &options(Some("black")), std::future::pending())
            .await
            .unwrap();

        match outcome {
            RunOutcome::Completed { catalog, report } => {
                assert_eq!(catalog.types().len(), 2);
                assert_eq!(report.summary().changed, 1);
            }
            other => panic!("expected completed run, got {other:?}"),
        }
        assert_eq!(device.artwork[0].matte_id.as_deref(), Some("frame_black"));
        assert_eq!(device.close_calls, 1);
    }

    #[tokio::test]
    async fn test_interrupt_closes_device() {
        let mut device = device();

        let err = run_until(&mut device, &options(Some("none")), std::future::ready(()))
            .await
            .unwrap_err();

        assert!(matches!(err, MatteError::Interrupted));
        assert!(device.changes.is_empty());
        assert!(device.is_closed());
    }
}
