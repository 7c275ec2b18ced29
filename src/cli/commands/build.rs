//! Static site build command.

use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use quatrains::config::Settings;
use quatrains::site::SiteBuilder;

/// Render the site into the output directory.
pub async fn cmd_build(
    settings: &Settings,
    output: Option<PathBuf>,
    base_url: Option<String>,
) -> anyhow::Result<()> {
    let mut builder = SiteBuilder::from_settings(settings);
    if let Some(output) = output {
        builder.output_dir = output;
    }
    if let Some(base_url) = base_url {
        builder.base_url = base_url;
    }

    println!(
        "{} Building site from {}",
        style("→").cyan(),
        builder.data_dir.display()
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    pb.set_message("pages");

    let result = builder
        .build_with_progress(|done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        })
        .await;
    pb.finish_and_clear();
    let report = result?;

    println!(
        "{} Wrote {} quatrain pages to {}",
        style("✓").green(),
        report.pages,
        builder.output_dir.display()
    );
    for path in &report.copied {
        println!("  {} Copied {}", style("✓").green(), path.display());
    }
    if report.pages == 0 {
        println!(
            "{} No century files found in {}",
            style("!").yellow(),
            builder.data_dir.display()
        );
    }

    Ok(())
}
