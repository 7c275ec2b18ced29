//! Data file maintenance commands.

use console::style;

use quatrains::config::Settings;
use quatrains::data::{assign_image, check};
use quatrains::models::Century;

/// Set the image of every quatrain in one century file.
pub fn cmd_set_image(settings: &Settings, century: u32, image: &str) -> anyhow::Result<()> {
    let century = Century::new(century)?;
    let path = settings.local_source().century_path(century);
    let updated = assign_image(&path, image)?;
    println!(
        "{} Set image {} on {} quatrains in {}",
        style("✓").green(),
        style(image).cyan(),
        updated,
        path.display()
    );
    Ok(())
}

/// Validate every century file.
pub async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let source = settings.source()?;
    println!("{} Checking {}", style("→").cyan(), source.describe());

    let report = check(source.as_ref()).await;
    for finding in &report.findings {
        println!("  {} {}", style("✗").red(), finding);
    }

    if report.is_clean() {
        println!(
            "{} {} centuries, {} quatrains, no problems",
            style("✓").green(),
            report.centuries,
            report.quatrains
        );
        Ok(())
    } else {
        anyhow::bail!(
            "{} problems in {} centuries ({} quatrains)",
            report.findings.len(),
            report.centuries,
            report.quatrains
        )
    }
}
