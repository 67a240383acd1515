//! Static export: writes the list page, one detail page per loadable record
//! and a 404 page under the output directory.
//!
//! Layout:
//! - `<out>/index.html`
//! - `<out>/careers/<id>/index.html`
//! - `<out>/404.html`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::careers::{CareerLoader, LoadFailure};
use crate::render::{render_detail_page, render_list_page, render_not_found_page};

#[derive(Debug, Default)]
pub struct ExportSummary {
    /// Every file written, in write order.
    pub pages: Vec<PathBuf>,
    /// Ids that were enumerated but produced no page.
    pub skipped: Vec<LoadFailure>,
}

/// Renders the whole site into `out_dir`, creating it if needed. Detail pages
/// from earlier builds are removed first, so only records that load now are
/// published. Content failures only skip the affected id; I/O failures on the
/// output side abort.
pub async fn export_site(loader: &CareerLoader, out_dir: &Path) -> Result<ExportSummary> {
    let report = loader.load_report().await;
    clear_detail_pages(&out_dir.join("careers")).await?;
    let mut summary = ExportSummary {
        pages: Vec::with_capacity(report.records.len() + 2),
        skipped: report.failures,
    };

    write_page(out_dir.join("index.html"), render_list_page(&report.records), &mut summary).await?;

    for record in &report.records {
        let path = out_dir.join("careers").join(&record.id).join("index.html");
        write_page(path, render_detail_page(record), &mut summary).await?;
    }

    write_page(out_dir.join("404.html"), render_not_found_page(), &mut summary).await?;

    for failure in &summary.skipped {
        warn!("No page for '{}': {}", failure.id, failure.error);
    }
    info!(
        "Exported {} page(s) to {} ({} skipped)",
        summary.pages.len(),
        out_dir.display(),
        summary.skipped.len()
    );
    Ok(summary)
}

async fn clear_detail_pages(dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to clear {}", dir.display())),
    }
}

async fn write_page(path: PathBuf, html: String, summary: &mut ExportSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(&path, html)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    summary.pages.push(path);
    Ok(())
}
