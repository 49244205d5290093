//! # Traversal: step chain, lifecycle, and pull loop
//!
//! A `Traversal` owns an ordered chain of [`Step`]s and evaluates it lazily:
//! work happens only when a caller asks for the next result.
//!
//! ## Lifecycle
//!
//! `Building -> Locked -> Iterating <-> Exhausted`. While building, steps,
//! labels, modulators and strategies may be changed freely. The first call to
//! [`Traversal::has_next`], [`Traversal::next`], [`Traversal::inject`] or
//! [`Traversal::traverser_generator`] locks the traversal: strategies run once,
//! label references are validated, and the requirement set is fixed. After
//! that every mutation fails with [`TraversalError::Locked`].
//!
//! ## Pull loop
//!
//! Each step has an inbound queue. To produce a result the traversal always
//! advances the most downstream step that has queued input, and only draws a
//! new seed when every queue is empty. Results therefore come out as soon as
//! they exist, in seed order.

use crate::config::{EngineConfig, PathTracking};
use crate::error::{TraversalError, TraversalResult};
use crate::generator::TraverserGenerator;
use crate::label::LabelSet;
use crate::outcome::Outcome;
use crate::requirement::{Requirement, Requirements};
use crate::schematic::Schematic;
use crate::step::Step;
use crate::strategy::Strategy;
use crate::traverser::Traverser;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, debug_span, trace};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraversalId(Uuid);

impl TraversalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TraversalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraversalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalState {
    Building,
    Locked,
    Iterating,
    Exhausted,
}

type SeedSource = Box<dyn Iterator<Item = Traverser> + Send>;

pub struct Traversal {
    id: TraversalId,
    steps: Vec<Box<dyn Step>>,
    strategies: Vec<Arc<dyn Strategy>>,
    config: Arc<EngineConfig>,
    state: TraversalState,
    strategies_applied: bool,
    requirements: Arc<Requirements>,
    // Per step: labels still read downstream. `None` disables pruning.
    keep_labels: Vec<Option<LabelSet>>,
    seeds: VecDeque<SeedSource>,
    // pending[k] feeds step k; pending[len] holds finished results.
    pending: Vec<VecDeque<Traverser>>,
    lookahead: Option<Traverser>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            id: TraversalId::new(),
            steps: Vec::new(),
            strategies: Vec::new(),
            config: Arc::new(config),
            state: TraversalState::Building,
            strategies_applied: false,
            requirements: Arc::new(Requirements::new()),
            keep_labels: Vec::new(),
            seeds: VecDeque::new(),
            pending: vec![VecDeque::new()],
            lookahead: None,
        }
    }

    pub fn builder() -> TraversalBuilder {
        TraversalBuilder::new(Traversal::new())
    }

    pub fn id(&self) -> TraversalId {
        self.id
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state != TraversalState::Building
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&dyn Step> {
        self.steps.get(index).map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The requirement set fixed at lock time; empty while building.
    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn schematic(&self) -> Schematic {
        Schematic::of(self)
    }

    // ------------------------------------------------------------------
    // Structural mutation (building only)
    // ------------------------------------------------------------------

    fn ensure_building(&self) -> TraversalResult<()> {
        if self.is_locked() {
            return Err(TraversalError::Locked);
        }
        Ok(())
    }

    fn index_error(&self, index: usize) -> TraversalError {
        TraversalError::StepIndex {
            index,
            len: self.steps.len(),
        }
    }

    pub fn add_step<S: Step + 'static>(&mut self, step: S) -> TraversalResult<&mut Self> {
        self.push_step(Box::new(step))
    }

    pub fn push_step(&mut self, step: Box<dyn Step>) -> TraversalResult<&mut Self> {
        self.ensure_building()?;
        self.steps.push(step);
        Ok(self)
    }

    pub fn insert_step(&mut self, index: usize, step: Box<dyn Step>) -> TraversalResult<()> {
        self.ensure_building()?;
        if index > self.steps.len() {
            return Err(self.index_error(index));
        }
        self.steps.insert(index, step);
        Ok(())
    }

    pub fn remove_step(&mut self, index: usize) -> TraversalResult<Box<dyn Step>> {
        self.ensure_building()?;
        if index >= self.steps.len() {
            return Err(self.index_error(index));
        }
        Ok(self.steps.remove(index))
    }

    pub fn replace_step(&mut self, index: usize, step: Box<dyn Step>) -> TraversalResult<Box<dyn Step>> {
        self.ensure_building()?;
        let err = self.index_error(index);
        let slot = self.steps.get_mut(index).ok_or(err)?;
        Ok(std::mem::replace(slot, step))
    }

    pub fn step_mut(&mut self, index: usize) -> TraversalResult<&mut Box<dyn Step>> {
        self.ensure_building()?;
        let err = self.index_error(index);
        self.steps.get_mut(index).ok_or(err)
    }

    fn last_step_mut(&mut self) -> TraversalResult<&mut Box<dyn Step>> {
        self.ensure_building()?;
        let last = self.steps.len().checked_sub(1).ok_or(self.index_error(0))?;
        self.step_mut(last)
    }

    /// Label the last step (`as(label)`).
    pub fn add_label(&mut self, label: &str) -> TraversalResult<&mut Self> {
        self.last_step_mut()?.base_mut().labels.insert(label);
        Ok(self)
    }

    /// `by()` modulation of the last step.
    pub fn modulate_by(&mut self, child: Traversal) -> TraversalResult<&mut Self> {
        self.last_step_mut()?.add_child(child)?;
        Ok(self)
    }

    pub fn modulate_from(&mut self, label: &str) -> TraversalResult<&mut Self> {
        self.last_step_mut()?.modulate_from(label)?;
        Ok(self)
    }

    pub fn modulate_to(&mut self, label: &str) -> TraversalResult<&mut Self> {
        self.last_step_mut()?.modulate_to(label)?;
        Ok(self)
    }

    pub fn add_strategy<S: Strategy + 'static>(&mut self, strategy: S) -> TraversalResult<&mut Self> {
        self.ensure_building()?;
        self.strategies.push(Arc::new(strategy));
        Ok(self)
    }

    pub fn add_child_traversal(&mut self, step_index: usize, child: Traversal) -> TraversalResult<()> {
        self.step_mut(step_index)?.add_child(child)
    }

    /// Returns false if the step has no child with id `old`.
    pub fn replace_child_traversal(
        &mut self,
        step_index: usize,
        old: TraversalId,
        new: Traversal,
    ) -> TraversalResult<bool> {
        self.step_mut(step_index)?.replace_child(old, new)
    }

    pub fn child_traversals_mut(&mut self, step_index: usize) -> TraversalResult<Vec<&mut Traversal>> {
        Ok(self.step_mut(step_index)?.children_mut())
    }

    // ------------------------------------------------------------------
    // Locking
    // ------------------------------------------------------------------

    /// Apply strategies, validate labels and fix the requirement set.
    ///
    /// A no-op once locked. Strategies run at most once even if validation
    /// fails and the lock is attempted again.
    pub fn lock(&mut self) -> TraversalResult<()> {
        if self.is_locked() {
            return Ok(());
        }
        let span = debug_span!("lock", strand.traversal = %self.id);
        let _enter = span.enter();

        if !self.strategies_applied {
            self.strategies_applied = true;
            let strategies = self.strategies.clone();
            for strategy in &strategies {
                debug!(strategy = strategy.name(), "applying strategy");
                strategy.apply(self)?;
            }
        }

        if self.config.validate_labels {
            self.validate_labels()?;
        }

        for step in &mut self.steps {
            for child in step.children_mut() {
                child.lock()?;
            }
        }

        let mut requirements = Requirements::new();
        for step in &self.steps {
            requirements.union(&step.requirements());
        }
        if self.config.path_tracking == PathTracking::Always {
            requirements.insert(Requirement::Path);
        }
        self.requirements = Arc::new(requirements);
        self.keep_labels = self.compute_keep_labels();
        self.pending = (0..=self.steps.len()).map(|_| VecDeque::new()).collect();
        self.state = TraversalState::Locked;

        debug!(
            requirements = %self.requirements,
            steps = self.steps.len(),
            "traversal locked"
        );
        Ok(())
    }

    fn validate_labels(&self) -> TraversalResult<()> {
        let mut bound = LabelSet::new();
        for step in &self.steps {
            if let Some(label) = step
                .referenced_labels()
                .into_iter()
                .find(|label| !bound.contains(label))
            {
                return Err(TraversalError::UnboundLabel {
                    label: label.to_string(),
                    step: step.describe(),
                });
            }
            bound.extend_from(step.labels());
        }
        Ok(())
    }

    fn compute_keep_labels(&self) -> Vec<Option<LabelSet>> {
        if !self.config.prune_labels {
            return vec![None; self.steps.len()];
        }
        let mut keep = vec![None; self.steps.len()];
        let mut downstream = LabelSet::new();
        for (index, step) in self.steps.iter().enumerate().rev() {
            keep[index] = Some(downstream.clone());
            for label in step.referenced_labels() {
                downstream.insert(label);
            }
        }
        keep
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    /// Generator for seed traversers matching this traversal's requirements.
    /// Locks the traversal.
    pub fn traverser_generator(&mut self) -> TraversalResult<TraverserGenerator> {
        self.lock()?;
        Ok(TraverserGenerator::new(self.requirements.clone()))
    }

    /// Queue seed traversers. Batches are consumed in the order they were added.
    pub fn add_starts<I>(&mut self, starts: I)
    where
        I: IntoIterator<Item = Traverser>,
        I::IntoIter: Send + 'static,
    {
        self.seeds.push_back(Box::new(starts.into_iter()));
        if self.state == TraversalState::Exhausted {
            self.state = TraversalState::Iterating;
        }
    }

    pub fn add_start(&mut self, traverser: Traverser) {
        self.add_starts(std::iter::once(traverser));
    }

    /// Lock, then queue one seed per value with the configured initial bulk.
    pub fn inject<I>(&mut self, values: I) -> TraversalResult<&mut Self>
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        let generator = self.traverser_generator()?;
        let seeds = generator.generate(values, self.step(0), self.config.initial_bulk);
        self.add_starts(seeds);
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Whether another result exists. Repeated calls are side-effect free.
    pub fn has_next(&mut self) -> TraversalResult<bool> {
        self.lock()?;
        if self.lookahead.is_some() {
            return Ok(true);
        }
        match self.advance()? {
            Some(traverser) => {
                self.lookahead = Some(traverser);
                self.state = TraversalState::Iterating;
                Ok(true)
            }
            None => {
                self.state = TraversalState::Exhausted;
                Ok(false)
            }
        }
    }

    /// Next result value. A traverser with bulk `n` yields its value `n` times.
    pub fn next(&mut self) -> TraversalResult<Value> {
        if !self.has_next()? {
            return Err(TraversalError::NoSuchElement);
        }
        match self.lookahead.take() {
            Some(mut traverser) if traverser.bulk() > 1 => {
                let value = traverser.value().clone();
                traverser.set_bulk(traverser.bulk() - 1);
                self.lookahead = Some(traverser);
                Ok(value)
            }
            Some(traverser) => Ok(traverser.into_value()),
            None => Err(TraversalError::NoSuchElement),
        }
    }

    /// Next result traverser, whole bulk included.
    pub fn next_traverser(&mut self) -> TraversalResult<Traverser> {
        if !self.has_next()? {
            return Err(TraversalError::NoSuchElement);
        }
        self.lookahead.take().ok_or(TraversalError::NoSuchElement)
    }

    pub fn to_list(&mut self) -> TraversalResult<Vec<Value>> {
        let mut results = Vec::new();
        while self.has_next()? {
            results.push(self.next()?);
        }
        Ok(results)
    }

    /// Consume every remaining result and return how many there were.
    pub fn drain(&mut self) -> TraversalResult<u64> {
        let mut count = 0;
        while self.has_next()? {
            count += self.next_traverser()?.bulk();
        }
        Ok(count)
    }

    pub fn iter(&mut self) -> Iter<'_> {
        Iter { traversal: self }
    }

    /// Drop every in-flight traverser, queued seeds and the lookahead, and
    /// reset each step. Structure and lock state are kept.
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.reset();
        }
        for queue in &mut self.pending {
            queue.clear();
        }
        self.seeds.clear();
        self.lookahead = None;
        if self.is_locked() {
            self.state = TraversalState::Locked;
        }
        trace!(strand.traversal = %self.id, "traversal reset");
    }

    fn advance(&mut self) -> TraversalResult<Option<Traverser>> {
        let last = self.steps.len();
        loop {
            if let Some(result) = self.pending[last].pop_front() {
                return Ok(Some(result));
            }
            let work = self.pending[..last]
                .iter_mut()
                .enumerate()
                .rev()
                .find_map(|(index, queue)| queue.pop_front().map(|t| (index, t)));
            let (index, traverser) = match work {
                Some(work) => work,
                None => match self.next_seed() {
                    Some(seed) => {
                        self.pending[0].push_back(seed);
                        continue;
                    }
                    None => return Ok(None),
                },
            };
            trace!(step = self.steps[index].name(), value = %traverser.value(), "process");
            match self.steps[index].process(traverser)? {
                Outcome::Next(t) => self.emit(index, t),
                Outcome::Filtered => {}
                Outcome::Expand(ts) => {
                    for t in ts {
                        self.emit(index, t);
                    }
                }
            }
        }
    }

    fn emit(&mut self, index: usize, mut traverser: Traverser) {
        traverser.add_labels(self.steps[index].labels());
        if let Some(Some(keep)) = self.keep_labels.get(index) {
            traverser.retain_labels(keep);
        }
        self.pending[index + 1].push_back(traverser);
    }

    fn next_seed(&mut self) -> Option<Traverser> {
        while let Some(source) = self.seeds.front_mut() {
            if let Some(seed) = source.next() {
                return Some(seed);
            }
            self.seeds.pop_front();
        }
        None
    }
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy of the structure. Iteration state (seeds, in-flight traversers)
/// is not copied; the lock state and requirement set are.
impl Clone for Traversal {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            steps: self.steps.clone(),
            strategies: self.strategies.clone(),
            config: self.config.clone(),
            state: if self.is_locked() {
                TraversalState::Locked
            } else {
                TraversalState::Building
            },
            strategies_applied: self.strategies_applied,
            requirements: self.requirements.clone(),
            keep_labels: self.keep_labels.clone(),
            seeds: VecDeque::new(),
            pending: (0..=self.steps.len()).map(|_| VecDeque::new()).collect(),
            lookahead: None,
        }
    }
}

impl fmt::Debug for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .field("strategies", &self.strategies)
            .field("requirements", &self.requirements)
            .finish()
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", step.describe())?;
        }
        write!(f, "]")
    }
}

/// Iterator over a traversal's remaining results.
pub struct Iter<'a> {
    traversal: &'a mut Traversal,
}

impl Iterator for Iter<'_> {
    type Item = TraversalResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.traversal.has_next() {
            Ok(true) => Some(self.traversal.next()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<'a> IntoIterator for &'a mut Traversal {
    type Item = TraversalResult<Value>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Fluent construction of a traversal in the building state.
///
/// The first failing call is remembered and reported by [`TraversalBuilder::build`].
#[derive(Debug)]
pub struct TraversalBuilder {
    traversal: Traversal,
    error: Option<TraversalError>,
}

impl TraversalBuilder {
    pub fn new(traversal: Traversal) -> Self {
        Self {
            traversal,
            error: None,
        }
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::new(Traversal::with_config(config))
    }

    fn record<T>(mut self, result: TraversalResult<T>) -> Self {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
        self
    }

    pub fn then<S: Step + 'static>(mut self, step: S) -> Self {
        let result = self.traversal.add_step(step).map(|_| ());
        self.record(result)
    }

    pub fn label(mut self, label: &str) -> Self {
        let result = self.traversal.add_label(label).map(|_| ());
        self.record(result)
    }

    pub fn by(mut self, child: Traversal) -> Self {
        let result = self.traversal.modulate_by(child).map(|_| ());
        self.record(result)
    }

    pub fn from(mut self, label: &str) -> Self {
        let result = self.traversal.modulate_from(label).map(|_| ());
        self.record(result)
    }

    pub fn to(mut self, label: &str) -> Self {
        let result = self.traversal.modulate_to(label).map(|_| ());
        self.record(result)
    }

    pub fn strategy<S: Strategy + 'static>(mut self, strategy: S) -> Self {
        let result = self.traversal.add_strategy(strategy).map(|_| ());
        self.record(result)
    }

    pub fn build(self) -> TraversalResult<Traversal> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.traversal),
        }
    }
}
