//! Century/quatrain selection state with stale-load protection.

use crate::error::{Error, Result};
use crate::models::{Century, CenturyDocument, Quatrain, QuatrainId};

/// Token identifying one century load request.
///
/// Only the most recently issued ticket may install its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub century: Century,
    generation: u64,
}

/// Currently loaded century document, its sorted numbers, the quatrain chosen
/// in the selector and the quatrain on display.
#[derive(Debug, Default)]
pub struct Selection {
    document: Option<CenturyDocument>,
    numbers: Vec<u32>,
    chosen: Option<u32>,
    displayed: Option<u32>,
    generation: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load of `century`, superseding any load in flight.
    pub fn begin_load(&mut self, century: Century) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            century,
            generation: self.generation,
        }
    }

    /// Whether `ticket` is the latest load request.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Install a loaded document. Returns false (and changes nothing) when the
    /// ticket was superseded.
    pub fn complete_load(&mut self, ticket: LoadTicket, document: CenturyDocument) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                "Discarding stale load of century {} (generation {} < {})",
                ticket.century,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.numbers = document.numbers();
        self.document = Some(document);
        self.chosen = None;
        self.displayed = None;
        true
    }

    pub fn century(&self) -> Option<Century> {
        self.document.as_ref().map(CenturyDocument::century)
    }

    pub fn document(&self) -> Option<&CenturyDocument> {
        self.document.as_ref()
    }

    /// Quatrain numbers of the loaded century, ascending.
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    /// Quatrain picked in the selector but not necessarily displayed.
    pub fn chosen(&self) -> Option<u32> {
        self.chosen
    }

    pub fn displayed(&self) -> Option<QuatrainId> {
        let century = self.century()?;
        self.displayed.map(|number| QuatrainId { century, number })
    }

    /// Record the selector value. `None` clears it.
    pub fn choose(&mut self, number: Option<u32>) {
        self.chosen = number;
    }

    /// Look up `number` in the loaded document.
    pub fn lookup(&self, number: u32) -> Result<(QuatrainId, &Quatrain)> {
        let document = self.document.as_ref().ok_or(Error::NoCenturyLoaded)?;
        let quatrain = document.require(number)?;
        Ok((document.id(number), quatrain))
    }

    /// Mark `number` as displayed (and chosen).
    pub fn display(&mut self, number: u32) -> Result<(QuatrainId, &Quatrain)> {
        self.lookup(number)?;
        self.chosen = Some(number);
        self.displayed = Some(number);
        self.lookup(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(century: u32, numbers: &[u32]) -> CenturyDocument {
        CenturyDocument::from_quatrains(
            Century::new(century).unwrap(),
            numbers.iter().map(|n| (*n, Quatrain::default())),
        )
    }

    #[test]
    fn test_complete_load_installs_document() {
        let mut selection = Selection::new();
        let ticket = selection.begin_load(Century::new(2).unwrap());
        assert!(selection.complete_load(ticket, doc(2, &[3, 1, 2])));
        assert_eq!(selection.numbers(), &[1, 2, 3]);
        assert_eq!(selection.century().unwrap().get(), 2);
        assert!(selection.displayed().is_none());
    }

    #[test]
    fn test_stale_load_discarded() {
        let mut selection = Selection::new();
        let first = selection.begin_load(Century::new(2).unwrap());
        let second = selection.begin_load(Century::new(3).unwrap());

        assert!(selection.complete_load(second, doc(3, &[1])));
        assert!(!selection.complete_load(first, doc(2, &[1, 2])));
        assert_eq!(selection.century().unwrap().get(), 3);
    }

    #[test]
    fn test_lookup_without_document() {
        let selection = Selection::new();
        assert!(matches!(selection.lookup(1), Err(Error::NoCenturyLoaded)));
    }

    #[test]
    fn test_display_missing_keeps_state() {
        let mut selection = Selection::new();
        let ticket = selection.begin_load(Century::new(1).unwrap());
        selection.complete_load(ticket, doc(1, &[1, 2]));
        selection.display(2).unwrap();

        assert!(matches!(
            selection.display(9),
            Err(Error::QuatrainNotFound { century: 1, number: 9 })
        ));
        assert_eq!(selection.displayed().unwrap().number, 2);
    }

    #[test]
    fn test_reload_clears_display() {
        let mut selection = Selection::new();
        let ticket = selection.begin_load(Century::new(1).unwrap());
        selection.complete_load(ticket, doc(1, &[1]));
        selection.display(1).unwrap();

        let ticket = selection.begin_load(Century::new(2).unwrap());
        selection.complete_load(ticket, doc(2, &[4]));
        assert!(selection.displayed().is_none());
        assert!(selection.chosen().is_none());
    }
}
