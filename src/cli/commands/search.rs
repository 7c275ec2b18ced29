//! One-shot search command.

use console::style;

use quatrains::config::Settings;
use quatrains::search::{build_index, SearchOutcome};

use super::helpers::print_outcome;

/// Build the index and run one query.
pub async fn cmd_search(settings: &Settings, query: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let mut options = settings.search.clone();
    if let Some(limit) = limit {
        options.limit = limit;
    }

    let source = settings.source()?;
    let index = build_index(source.as_ref(), options).await?;
    if index.is_empty() {
        anyhow::bail!("No quatrains could be loaded from {}", source.describe());
    }

    let outcome = index.query(query);
    if outcome == SearchOutcome::Hidden {
        println!(
            "{} Query must be at least {} characters",
            style("!").yellow(),
            index.options().min_query_len
        );
        return Ok(());
    }
    print_outcome(&outcome);
    Ok(())
}
