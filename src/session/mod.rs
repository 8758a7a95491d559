//! The configurator handle: one owner for the state, the filter query, the
//! applier, the synchronizer and the viewer.
//!
//! Every change enters through [`Configurator::dispatch`]. A successful
//! selection is pushed to the viewer and then every surface is refreshed,
//! in that order.

mod intent;


use std::time::Duration;

use crate::applier::{ApplyOutcome, BindingError, VariantApplier};
use crate::category::Category;
use crate::filter::FilterQuery;
use crate::selection::{InvalidSelection, SelectionState};
use crate::sync::{Projection, ProjectionSink, ViewSynchronizer};
use crate::viewer::Viewer;

pub use intent::{Intent, StepError};

pub struct Configurator<V> {
    state: SelectionState,
    query: FilterQuery,
    applier: VariantApplier,
    sync: ViewSynchronizer,
    viewer: V,
}

impl<V: Viewer> Configurator<V> {
    pub fn new(state: SelectionState, applier: VariantApplier, viewer: V) -> Self {
        let mut configurator = Self {
            state,
            query: FilterQuery::default(),
            applier,
            sync: ViewSynchronizer::new(),
            viewer,
        };
        configurator.refresh();
        configurator
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn applier(&self) -> &VariantApplier {
        &self.applier
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn into_viewer(self) -> V {
        self.viewer
    }

    pub fn subscribe(&mut self, sink: Box<dyn ProjectionSink>) {
        self.sync.subscribe(sink);
    }

    pub fn projection(&self) -> Projection {
        ViewSynchronizer::project(&self.state, &self.query)
    }

    /// Apply an intent. Returns `false` if it was rejected; the state is then
    /// exactly as before.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        let accepted = match intent {
            Intent::SetActiveCategory(category) => {
                self.state.set_active_category(category);
                self.query.clear();
                true
            }
            Intent::SetFilterQuery(text) => {
                self.query = FilterQuery::new(text);
                true
            }
            Intent::SelectVariant { category, name } => {
                let result = self.state.select_discrete(category, &name);
                self.commit(category, result.map(drop))
            }
            Intent::SetColor { category, hex } => {
                let result = self.state.set_continuous_color(category, &hex);
                self.commit(category, result.map(drop))
            }
        };

        self.refresh();
        accepted
    }

    /// Bind the viewer's surfaces and push every current selection onto them.
    /// Returns the number of bound categories.
    pub fn viewer_ready(&mut self) -> Result<usize, BindingError> {
        let bound = self.applier.bind_viewer(&mut self.viewer)?;
        for category in Category::ALL {
            self.apply(category);
        }
        log::debug!("viewer ready with {bound} bound categories");
        Ok(bound)
    }

    /// Write finished texture resolutions to the viewer.
    pub fn pump(&mut self) -> usize {
        self.applier.pump(&mut self.viewer)
    }

    /// Block until pending texture requests land or `timeout` passes.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        self.applier.settle(&mut self.viewer, timeout)
    }

    fn commit(&mut self, category: Category, result: Result<(), InvalidSelection>) -> bool {
        match result {
            Ok(()) => {
                self.apply(category);
                true
            }
            Err(err) => {
                log::debug!("rejected: {err}");
                false
            }
        }
    }

    fn apply(&mut self, category: Category) -> ApplyOutcome {
        let current = self.state.current(category);
        self.applier.apply(&mut self.viewer, category, current)
    }

    fn refresh(&mut self) {
        self.sync.refresh(&self.state, &self.query);
    }
}
