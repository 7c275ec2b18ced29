//! Sequential navigation over the total order (century, then number).
//!
//! These helpers are pure: they decide where prev/next lead given what is
//! loaded. Loading the neighbouring century is the caller's job.

use crate::models::{Century, CenturyDocument, QuatrainId};

use super::render::NavState;

/// Which end of a century to land on after crossing into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

/// Outcome of a prev/next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move to another number in the loaded century.
    Within(u32),
    /// Load another century and land on one of its ends.
    Cross(Century, Edge),
    /// Already at the boundary of the corpus.
    Stay,
}

/// Where "next" leads from `current` in `document`.
pub fn next_step(document: &CenturyDocument, current: u32) -> Step {
    if let Some(n) = document.number_after(current) {
        return Step::Within(n);
    }
    match document.century().next() {
        Some(century) => Step::Cross(century, Edge::First),
        None => Step::Stay,
    }
}

/// Where "previous" leads from `current` in `document`.
pub fn prev_step(document: &CenturyDocument, current: u32) -> Step {
    if let Some(n) = document.number_before(current) {
        return Step::Within(n);
    }
    match document.century().prev() {
        Some(century) => Step::Cross(century, Edge::Last),
        None => Step::Stay,
    }
}

/// Number at one end of a document.
pub fn edge_number(document: &CenturyDocument, edge: Edge) -> Option<u32> {
    match edge {
        Edge::First => document.first_number(),
        Edge::Last => document.last_number(),
    }
}

/// Control state for the displayed quatrain.
///
/// Previous is disabled only on the first quatrain of century 1, next only on
/// the last quatrain of century 10.
pub fn nav_state(document: &CenturyDocument, current: u32) -> NavState {
    let numbers = document.numbers();
    let index = numbers.iter().position(|n| *n == current);
    let last = numbers.len().checked_sub(1);
    let century = document.century();

    NavState {
        prev_disabled: index == Some(0) && century.is_first(),
        next_disabled: index.is_some() && index == last && century.is_last(),
    }
}

/// Previous and next ids of `id` within a sorted list of ids.
pub fn neighbours(sorted: &[QuatrainId], id: QuatrainId) -> (Option<QuatrainId>, Option<QuatrainId>) {
    match sorted.binary_search(&id) {
        Ok(i) => {
            let prev = i.checked_sub(1).map(|p| sorted[p]);
            let next = sorted.get(i + 1).copied();
            (prev, next)
        }
        Err(_) => (None, None),
    }
}
