//! Browsing state machine.
//!
//! `Viewer` owns the selection state and turns UI events (century change,
//! quatrain change, load click, Enter, prev, next, random, search-result
//! click) into state transitions, returning a [`ViewUpdate`] describing what
//! to redraw. Cross-century moves await the century load before acting on it.

pub mod navigator;
pub mod render;
pub mod selection;

pub use navigator::{Edge, Step};
pub use render::{
    embed_url, ImageView, LinePair, NavState, QuatrainView, RenderOptions, VideoEmbed,
    DEFAULT_IMAGE_BASE,
};
pub use selection::{LoadTicket, Selection};

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::models::{Century, CenturyDocument, QuatrainId};
use crate::source::CenturySource;

/// Alert shown when a century document cannot be loaded.
pub const LOAD_ALERT: &str = "Failed to load century data. Check the log for details.";

/// UI input understood by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Century selector changed.
    SelectCentury(u32),
    /// Quatrain selector changed; `None` is the placeholder entry.
    SelectQuatrain(Option<u32>),
    /// Load button clicked.
    Load,
    /// Enter pressed on the quatrain selector.
    Enter,
    Next,
    Previous,
    Random,
    /// Search result (or deep link) activated.
    Open(QuatrainId),
}

/// A displayed quatrain with its control state and deep link.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub view: QuatrainView,
    pub nav: NavState,
    pub link: String,
}

/// What the front end should redraw after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// A century finished loading; repopulate the quatrain selector.
    QuatrainList { century: Century, numbers: Vec<u32> },
    /// Enable or disable the load button.
    LoadEnabled(bool),
    Display(Box<Rendered>),
    /// Non-fatal condition worth telling the user (e.g. missing quatrain).
    Notice(String),
    /// Load failure; the details were logged.
    Alert(String),
    Unchanged,
}

/// Result of a century selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Document installed; quatrain numbers ascending.
    Loaded(Vec<u32>),
    /// A newer selection superseded this one.
    Stale,
}

/// Application state for browsing one century at a time.
pub struct Viewer {
    source: Arc<dyn CenturySource>,
    selection: Selection,
    options: RenderOptions,
}

impl Viewer {
    pub fn new(source: Arc<dyn CenturySource>, options: RenderOptions) -> Self {
        Self {
            source,
            selection: Selection::new(),
            options,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn source(&self) -> Arc<dyn CenturySource> {
        Arc::clone(&self.source)
    }

    /// Load `century` and make it current.
    pub async fn select_century(&mut self, century: Century) -> Result<SelectOutcome> {
        let ticket = self.begin_load(century);
        let result = self.source.fetch_century(century).await;
        self.complete_load(ticket, result)
    }

    /// Issue a load ticket for a fetch the caller performs itself.
    pub fn begin_load(&mut self, century: Century) -> LoadTicket {
        self.selection.begin_load(century)
    }

    /// Finish a load started with [`Viewer::begin_load`].
    ///
    /// Failures are logged and leave the selection untouched.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<CenturyDocument>,
    ) -> Result<SelectOutcome> {
        let document = match result {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(
                    "Failed to load century {} from {}: {}",
                    ticket.century,
                    self.source.describe(),
                    e
                );
                return Err(e);
            }
        };

        if self.selection.complete_load(ticket, document) {
            tracing::debug!(
                "Century {} loaded ({} quatrains)",
                ticket.century,
                self.selection.numbers().len()
            );
            Ok(SelectOutcome::Loaded(self.selection.numbers().to_vec()))
        } else {
            Ok(SelectOutcome::Stale)
        }
    }

    /// Record the quatrain selector value. Returns whether loading is possible.
    pub fn choose_quatrain(&mut self, number: Option<u32>) -> bool {
        self.selection.choose(number);
        number.is_some()
    }

    /// Display `number` from the loaded century.
    pub fn display(&mut self, number: u32) -> Result<Rendered> {
        let (id, quatrain) = self.selection.display(number)?;
        let view = render::render(id, quatrain, &self.options);
        let document = self.selection.document().ok_or(Error::NoCenturyLoaded)?;
        Ok(Rendered {
            nav: navigator::nav_state(document, number),
            link: id.link(),
            view,
        })
    }

    /// Display the quatrain picked in the selector (load button or Enter).
    pub fn load_chosen(&mut self) -> Result<Option<Rendered>> {
        match self.selection.chosen() {
            Some(number) => self.display(number).map(Some),
            None => Ok(None),
        }
    }

    /// Advance to the next quatrain, crossing into the next century when at
    /// the end of this one. `None` when nothing moved.
    pub async fn next(&mut self) -> Result<Option<Rendered>> {
        let step = match self.current_step(navigator::next_step)? {
            Some(step) => step,
            None => return Ok(None),
        };
        self.follow(step).await
    }

    /// Step back to the previous quatrain, crossing into the previous century
    /// when at the start of this one. `None` when nothing moved.
    pub async fn previous(&mut self) -> Result<Option<Rendered>> {
        let step = match self.current_step(navigator::prev_step)? {
            Some(step) => step,
            None => return Ok(None),
        };
        self.follow(step).await
    }

    fn current_step(&self, step_fn: fn(&CenturyDocument, u32) -> Step) -> Result<Option<Step>> {
        let Some(current) = self.selection.displayed() else {
            return Ok(None);
        };
        let document = self.selection.document().ok_or(Error::NoCenturyLoaded)?;
        Ok(Some(step_fn(document, current.number)))
    }

    async fn follow(&mut self, step: Step) -> Result<Option<Rendered>> {
        match step {
            Step::Within(number) => self.display(number).map(Some),
            Step::Cross(century, edge) => {
                self.enter_century(century, |document| navigator::edge_number(document, edge))
                    .await
            }
            Step::Stay => Ok(None),
        }
    }

    /// Pick a uniformly random century, load it, then a uniformly random
    /// quatrain within it.
    pub async fn random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Rendered> {
        let century = Century::new(rng.gen_range(1..=10))?;
        self.enter_century(century, |document| document.numbers().choose(rng).copied())
            .await?
            .ok_or(Error::NoCenturyLoaded)
    }

    /// Load `century` and display the quatrain `pick` chooses from it.
    ///
    /// The document is only installed once `pick` has found a quatrain, so an
    /// empty century leaves the current position alone.
    async fn enter_century<F>(&mut self, century: Century, pick: F) -> Result<Option<Rendered>>
    where
        F: FnOnce(&CenturyDocument) -> Option<u32>,
    {
        let ticket = self.begin_load(century);
        let result = self.source.fetch_century(century).await;
        let number = match result.as_ref().map(pick) {
            Ok(Some(number)) => Some(number),
            Ok(None) => {
                tracing::warn!("Century {} has no quatrains, staying put", century);
                return Err(Error::EmptyCentury(century.get()));
            }
            Err(_) => None,
        };

        match (self.complete_load(ticket, result)?, number) {
            (SelectOutcome::Loaded(_), Some(number)) => self.display(number).map(Some),
            _ => Ok(None),
        }
    }

    /// Show a specific quatrain, loading its century first if needed.
    pub async fn open(&mut self, id: QuatrainId) -> Result<Rendered> {
        if self.selection.century() != Some(id.century) {
            self.select_century(id.century).await?;
        }
        self.display(id.number)
    }

    /// Dispatch one UI event.
    pub async fn handle<R: Rng + ?Sized>(&mut self, event: UiEvent, rng: &mut R) -> ViewUpdate {
        let result = match event {
            UiEvent::SelectCentury(n) => match Century::new(n) {
                Ok(century) => self.select_century(century).await.map(|outcome| match outcome {
                    SelectOutcome::Loaded(numbers) => ViewUpdate::QuatrainList { century, numbers },
                    SelectOutcome::Stale => ViewUpdate::Unchanged,
                }),
                Err(e) => Err(e),
            },
            UiEvent::SelectQuatrain(number) => Ok(ViewUpdate::LoadEnabled(self.choose_quatrain(number))),
            UiEvent::Load | UiEvent::Enter => self.load_chosen().map(display_or_unchanged),
            UiEvent::Next => self.next().await.map(display_or_unchanged),
            UiEvent::Previous => self.previous().await.map(display_or_unchanged),
            UiEvent::Random => self.random(rng).await.map(|r| ViewUpdate::Display(Box::new(r))),
            UiEvent::Open(id) => self.open(id).await.map(|r| ViewUpdate::Display(Box::new(r))),
        };

        result.unwrap_or_else(error_update)
    }
}

fn display_or_unchanged(rendered: Option<Rendered>) -> ViewUpdate {
    match rendered {
        Some(r) => ViewUpdate::Display(Box::new(r)),
        None => ViewUpdate::Unchanged,
    }
}

/// Map an error to what the user sees.
pub fn error_update(err: Error) -> ViewUpdate {
    if err.is_load_failure() {
        ViewUpdate::Alert(LOAD_ALERT.to_string())
    } else {
        ViewUpdate::Notice(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quatrain;
    use crate::source::MemorySource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quatrain(tag: &str) -> Quatrain {
        Quatrain {
            french: vec![format!("{tag} fr 1"), format!("{tag} fr 2")],
            english: vec![format!("{tag} en 1"), format!("{tag} en 2")],
            interpretation: tag.to_string(),
            video: None,
            image: None,
        }
    }

    fn source(centuries: &[(u32, &[u32])]) -> Arc<dyn CenturySource> {
        let mut source = MemorySource::new();
        for (c, numbers) in centuries {
            let century = Century::new(*c).unwrap();
            source.insert(CenturyDocument::from_quatrains(
                century,
                numbers.iter().map(|n| (*n, quatrain(&format!("{c}:{n}")))),
            ));
        }
        Arc::new(source)
    }

    fn viewer(centuries: &[(u32, &[u32])]) -> Viewer {
        Viewer::new(source(centuries), RenderOptions::default())
    }

    #[tokio::test]
    async fn test_select_then_load() {
        let mut v = viewer(&[(1, &[2, 1, 10])]);
        let mut rng = StdRng::seed_from_u64(1);

        let update = v.handle(UiEvent::SelectCentury(1), &mut rng).await;
        assert_eq!(
            update,
            ViewUpdate::QuatrainList {
                century: Century::FIRST,
                numbers: vec![1, 2, 10]
            }
        );

        assert_eq!(
            v.handle(UiEvent::SelectQuatrain(Some(10)), &mut rng).await,
            ViewUpdate::LoadEnabled(true)
        );

        match v.handle(UiEvent::Enter, &mut rng).await {
            ViewUpdate::Display(r) => {
                assert_eq!(r.view.title, "Century 1 - Quatrain 10");
                assert_eq!(r.link, "/c1/q010/");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_without_choice_is_noop() {
        let mut v = viewer(&[(1, &[1])]);
        let mut rng = StdRng::seed_from_u64(1);
        v.handle(UiEvent::SelectCentury(1), &mut rng).await;
        assert_eq!(v.handle(UiEvent::Load, &mut rng).await, ViewUpdate::Unchanged);
    }

    #[tokio::test]
    async fn test_failed_century_alerts_and_keeps_state() {
        let mut v = viewer(&[(1, &[1, 2])]);
        let mut rng = StdRng::seed_from_u64(1);
        v.handle(UiEvent::SelectCentury(1), &mut rng).await;
        v.display(2).unwrap();

        let update = v.handle(UiEvent::SelectCentury(4), &mut rng).await;
        assert_eq!(update, ViewUpdate::Alert(LOAD_ALERT.to_string()));
        assert_eq!(v.selection().century(), Some(Century::FIRST));
        assert_eq!(v.selection().displayed().unwrap().number, 2);
    }

    #[tokio::test]
    async fn test_invalid_century_is_notice() {
        let mut v = viewer(&[(1, &[1])]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            v.handle(UiEvent::SelectCentury(11), &mut rng).await,
            ViewUpdate::Notice(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_quatrain_is_surfaced() {
        let mut v = viewer(&[(1, &[1, 2])]);
        let mut rng = StdRng::seed_from_u64(1);
        v.handle(UiEvent::SelectCentury(1), &mut rng).await;
        v.handle(UiEvent::SelectQuatrain(Some(5)), &mut rng).await;
        assert_eq!(
            v.handle(UiEvent::Load, &mut rng).await,
            ViewUpdate::Notice("Quatrain 5 not found in century 1".to_string())
        );
    }

    #[tokio::test]
    async fn test_next_and_previous_before_display_are_noops() {
        let mut v = viewer(&[(1, &[1])]);
        assert_eq!(v.next().await.unwrap(), None);
        assert_eq!(v.previous().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_next_crosses_century() {
        let mut v = viewer(&[(1, &[1, 2]), (2, &[5, 3])]);
        v.select_century(Century::FIRST).await.unwrap();
        v.display(2).unwrap();

        let r = v.next().await.unwrap().unwrap();
        assert_eq!(r.view.id, QuatrainId::from_parts(2, 3).unwrap());
        assert_eq!(v.selection().numbers(), &[3, 5]);
    }

    #[tokio::test]
    async fn test_previous_crosses_century() {
        let mut v = viewer(&[(1, &[1, 2, 7]), (2, &[5, 3])]);
        v.open(QuatrainId::from_parts(2, 3).unwrap()).await.unwrap();

        let r = v.previous().await.unwrap().unwrap();
        assert_eq!(r.view.id, QuatrainId::from_parts(1, 7).unwrap());
    }

    #[tokio::test]
    async fn test_cross_into_missing_century_keeps_position() {
        let mut v = viewer(&[(1, &[1, 2])]);
        v.open(QuatrainId::from_parts(1, 2).unwrap()).await.unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let update = v.handle(UiEvent::Next, &mut rng).await;
        assert_eq!(update, ViewUpdate::Alert(LOAD_ALERT.to_string()));
        assert_eq!(
            v.selection().displayed(),
            Some(QuatrainId::from_parts(1, 2).unwrap())
        );
    }

    #[tokio::test]
    async fn test_cross_into_empty_century_keeps_position() {
        let mut v = viewer(&[(1, &[1, 2]), (2, &[])]);
        v.open(QuatrainId::from_parts(1, 2).unwrap()).await.unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let update = v.handle(UiEvent::Next, &mut rng).await;
        assert_eq!(update, ViewUpdate::Notice("Century 2 has no quatrains".to_string()));
        assert_eq!(v.selection().century(), Some(Century::FIRST));
        assert_eq!(
            v.selection().displayed(),
            Some(QuatrainId::from_parts(1, 2).unwrap())
        );

        match v.handle(UiEvent::Previous, &mut rng).await {
            ViewUpdate::Display(r) => assert_eq!(r.view.id, QuatrainId::from_parts(1, 1).unwrap()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_random_into_empty_century_keeps_position() {
        let empty: Vec<(u32, &[u32])> = (1..=10).map(|c| (c, &[][..])).collect();
        let mut v = viewer(&empty);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(v.random(&mut rng).await, Err(Error::EmptyCentury(_))));
        assert_eq!(v.selection().century(), None);
    }

    #[tokio::test]
    async fn test_random_lands_on_existing_quatrain() {
        const NUMBERS: &[u32] = &[1, 2, 3];
        let all: Vec<(u32, &[u32])> = (1..=10).map(|c| (c, NUMBERS)).collect();
        let mut v = viewer(&all);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let r = v.random(&mut rng).await.unwrap();
            assert!((1..=3).contains(&r.view.id.number));
            assert_eq!(v.selection().century(), Some(r.view.id.century));
        }
    }

    #[tokio::test]
    async fn test_stale_completion_reported() {
        let mut v = viewer(&[(1, &[1]), (2, &[1])]);
        let source = v.source();
        let first = v.begin_load(Century::FIRST);
        let second = v.begin_load(Century::new(2).unwrap());

        let doc2 = source.fetch_century(Century::new(2).unwrap()).await;
        let doc1 = source.fetch_century(Century::FIRST).await;
        assert!(matches!(v.complete_load(second, doc2), Ok(SelectOutcome::Loaded(_))));
        assert_eq!(v.complete_load(first, doc1).unwrap(), SelectOutcome::Stale);
        assert_eq!(v.selection().century().unwrap().get(), 2);
    }
}
