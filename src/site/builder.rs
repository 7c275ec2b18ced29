//! Static site generation: one page per quatrain at its deep-link path.

use std::path::{Path, PathBuf};

use askama::Template;

use super::collection::{collect, SiteItem};
use super::filters::site_path;
use super::templates::{CenturyOption, IndexTemplate, PageLink, QuatrainPageTemplate};
use crate::error::{Error, Result};
use crate::models::{Century, QuatrainId};
use crate::viewer::navigator::neighbours;
use crate::viewer::render::{render, RenderOptions};

/// Site entries copied verbatim into the output.
pub const PASSTHROUGH: &[&str] = &["js", "images", "style.css"];

const SITE_TITLE: &str = "Nostradamus Quatrains";

/// Summary of a finished build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: usize,
    pub copied: Vec<PathBuf>,
}

/// Renders the site from a data directory into an output directory.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    pub site_dir: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_url: String,
    pub image_base: String,
}

impl SiteBuilder {
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self {
            site_dir: settings.site_dir.clone(),
            data_dir: settings.data_dir.clone(),
            output_dir: settings.output_dir.clone(),
            base_url: settings.base_url.clone(),
            image_base: settings.image_base.clone(),
        }
    }

    /// Build without progress reporting.
    pub async fn build(&self) -> Result<BuildReport> {
        self.build_with_progress(|_, _| {}).await
    }

    /// Build the site, calling `on_page(done, total)` after each page.
    pub async fn build_with_progress<F>(&self, mut on_page: F) -> Result<BuildReport>
    where
        F: FnMut(usize, usize),
    {
        let items = collect(&self.data_dir).await?;
        tracing::info!(
            "Building {} quatrain pages from {} into {}",
            items.len(),
            self.data_dir.display(),
            self.output_dir.display()
        );

        create_dir(&self.output_dir).await?;
        let mut report = BuildReport::default();

        let index = IndexTemplate {
            title: SITE_TITLE,
            base_url: &self.base_url,
            path: "/".into(),
            centuries: Century::all()
                .map(|c| CenturyOption {
                    value: c.get(),
                    label: format!("Century {}", c),
                })
                .collect(),
            quatrain_count: items.len(),
        };
        write_page(&self.output_dir.join("index.html"), &index.render()?).await?;

        let options = RenderOptions {
            image_base: site_path(&self.image_base),
        };
        let ids: Vec<QuatrainId> = items.iter().map(|item| item.id).collect();
        let total = items.len();

        for (done, item) in items.iter().enumerate() {
            let html = self.render_page(item, &ids, &options)?;
            write_page(&self.page_path(item.id), &html).await?;
            report.pages += 1;
            on_page(done + 1, total);
        }

        for name in PASSTHROUGH {
            let from = self.site_dir.join(name);
            if !tokio::fs::try_exists(&from).await.unwrap_or(false) {
                tracing::debug!("No {} to copy", from.display());
                continue;
            }
            let to = self.output_dir.join(name);
            copy_recursive(&from, &to).await?;
            report.copied.push(to);
        }

        tracing::info!("Wrote {} pages", report.pages);
        Ok(report)
    }

    /// Output file for a quatrain page.
    pub fn page_path(&self, id: QuatrainId) -> PathBuf {
        self.output_dir
            .join(id.link().trim_matches('/'))
            .join("index.html")
    }

    fn render_page(&self, item: &SiteItem, ids: &[QuatrainId], options: &RenderOptions) -> Result<String> {
        let view = render(item.id, &item.quatrain, options);
        let (prev, next) = neighbours(ids, item.id);
        let page_link = |id: QuatrainId| PageLink {
            href: id.link(),
            label: id.title(),
        };

        let page = QuatrainPageTemplate {
            title: format!("{} | {}", view.title, SITE_TITLE),
            base_url: &self.base_url,
            path: item.id.link(),
            view: &view,
            prev: prev.map(page_link),
            next: next.map(page_link),
        };
        Ok(page.render()?)
    }
}

async fn create_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io(path, e))
}

async fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent).await?;
    }
    tokio::fs::write(path, html)
        .await
        .map_err(|e| Error::io(path, e))
}

/// Copy a file or directory tree.
async fn copy_recursive(from: &Path, to: &Path) -> Result<()> {
    let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((src, dst)) = pending.pop() {
        let meta = tokio::fs::metadata(&src)
            .await
            .map_err(|e| Error::io(&src, e))?;
        if !meta.is_dir() {
            if let Some(parent) = dst.parent() {
                create_dir(parent).await?;
            }
            tokio::fs::copy(&src, &dst)
                .await
                .map_err(|e| Error::io(&src, e))?;
            continue;
        }

        create_dir(&dst).await?;
        let mut entries = tokio::fs::read_dir(&src)
            .await
            .map_err(|e| Error::io(&src, e))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| Error::io(&src, e))? {
            pending.push((entry.path(), dst.join(entry.file_name())));
        }
    }
    Ok(())
}
