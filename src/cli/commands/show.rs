//! Single-quatrain commands: show, random, link, resolve.

use console::style;

use quatrains::config::Settings;
use quatrains::site::absolute_url;
use quatrains::viewer::{RenderOptions, Viewer};

use super::helpers::{parse_target_args, print_rendered};

fn viewer(settings: &Settings) -> anyhow::Result<Viewer> {
    let options = RenderOptions {
        image_base: settings.image_base.clone(),
    };
    Ok(Viewer::new(settings.source()?, options))
}

/// Show one quatrain.
pub async fn cmd_show(settings: &Settings, target: &[String], json: bool) -> anyhow::Result<()> {
    let id = parse_target_args(target)?;
    let mut viewer = viewer(settings)?;
    let rendered = viewer.open(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.view)?);
    } else {
        print_rendered(&rendered);
    }
    Ok(())
}

/// Show a random quatrain.
pub async fn cmd_random(settings: &Settings) -> anyhow::Result<()> {
    let mut viewer = viewer(settings)?;
    let mut rng = rand::thread_rng();
    let rendered = viewer.random(&mut rng).await?;
    print_rendered(&rendered);
    Ok(())
}

/// Print the deep link for a quatrain.
pub fn cmd_link(settings: &Settings, target: &[String], absolute: bool) -> anyhow::Result<()> {
    let id = parse_target_args(target)?;
    if absolute {
        println!("{}", absolute_url(&settings.base_url, &id.link()));
    } else {
        println!("{}", id.link());
    }
    Ok(())
}

/// Resolve a deep link.
pub fn cmd_resolve(link: &str) -> anyhow::Result<()> {
    let id = quatrains::models::parse_link(link)?;
    println!("{} {}", style(id.title()).bold(), style(format!("({})", id)).dim());
    Ok(())
}
