use super::budget::CandidateBudget;
use super::candidates::{generate_candidates, Candidate};
use super::combination::Combination;
use super::config::SearchConfig;
use super::oracle::FeasibilityOracle;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Where the driver is in its per-level cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Layer `k` is final.
    Level(usize),
    GenerateCandidates,
    Evaluate,
    Terminate,
}

/// Why a run stopped. Every variant leaves a valid, possibly partial, outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No candidates remained.
    Exhausted,
    LevelLimit,
    CandidateBudget,
}

/// Eligible combinations of one size with their witnesses, sorted.
#[derive(Debug, Clone)]
pub struct Layer<W> {
    size: usize,
    combinations: Vec<Combination>,
    witnesses: Vec<W>,
}

impl<W> Layer<W> {
    fn new(size: usize) -> Self {
        Self {
            size,
            combinations: Vec::new(),
            witnesses: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn witnesses(&self) -> &[W] {
        &self.witnesses
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Combination, &W)> {
        self.combinations.iter().zip(&self.witnesses)
    }

    pub fn get(&self, combination: &Combination) -> Option<&W> {
        self.combinations
            .binary_search(combination)
            .ok()
            .map(|idx| &self.witnesses[idx])
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome<W> {
    /// `layers[k - 1]` holds the eligible combinations of size `k`.
    pub layers: Vec<Layer<W>>,
    /// `infeasible[k - 1]` holds the evaluated combinations of size `k` that
    /// failed the oracle. All of their immediate subsets are eligible.
    pub infeasible: Vec<Vec<Combination>>,
    pub termination: Termination,
}

impl<W> SearchOutcome<W> {
    pub fn eligible(&self) -> impl Iterator<Item = &Combination> {
        self.layers.iter().flat_map(|layer| layer.combinations.iter())
    }

    pub fn infeasible(&self) -> impl Iterator<Item = &Combination> {
        self.infeasible.iter().flatten()
    }

    pub fn levels_explored(&self) -> usize {
        self.layers.len()
    }
}

/// Apriori-style walk over the subset lattice: seed single elements, then
/// repeatedly join the latest eligible layer and let the oracle judge the
/// joins.
pub struct LevelwiseSearch<'o, O: FeasibilityOracle> {
    oracle: &'o O,
    config: SearchConfig,
    budget: CandidateBudget,
}

impl<'o, O: FeasibilityOracle> LevelwiseSearch<'o, O> {
    pub fn new(oracle: &'o O, config: SearchConfig) -> Self {
        let budget = config
            .candidate_budget
            .map_or_else(CandidateBudget::unlimited, CandidateBudget::new);
        Self {
            oracle,
            config,
            budget,
        }
    }

    pub fn run(&self) -> SearchOutcome<O::Witness> {
        let ground_size = self.oracle.ground_size();
        log::info!("levelwise search over {ground_size} ground elements");

        let (first, rejected) = self.seed(ground_size);
        log::debug!(
            "level 1: {} eligible, {} infeasible",
            first.len(),
            rejected.len()
        );

        let mut layers = vec![first];
        let mut infeasible = vec![rejected];
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut termination = Termination::Exhausted;
        let mut phase = SearchPhase::Level(1);

        loop {
            phase = match phase {
                SearchPhase::Level(k) => {
                    if layers[k - 1].is_empty() {
                        SearchPhase::Terminate
                    } else if self.config.max_level.is_some_and(|max| k >= max) {
                        termination = Termination::LevelLimit;
                        SearchPhase::Terminate
                    } else {
                        SearchPhase::GenerateCandidates
                    }
                }
                SearchPhase::GenerateCandidates => {
                    let latest = &layers[layers.len() - 1];
                    candidates = generate_candidates(latest.combinations());
                    if candidates.is_empty() {
                        SearchPhase::Terminate
                    } else {
                        SearchPhase::Evaluate
                    }
                }
                SearchPhase::Evaluate => {
                    if let Err(err) = self.budget.reserve(candidates.len()) {
                        log::warn!("stopping before level {}: {err}", layers.len() + 1);
                        termination = Termination::CandidateBudget;
                        SearchPhase::Terminate
                    } else {
                        let evaluated = std::mem::take(&mut candidates);
                        let total = evaluated.len();
                        let (layer, rejected) = self.evaluate(&layers[layers.len() - 1], evaluated);
                        log::debug!(
                            "level {}: {} candidates, {} eligible, {} infeasible",
                            layer.size(),
                            total,
                            layer.len(),
                            rejected.len()
                        );
                        layers.push(layer);
                        infeasible.push(rejected);
                        SearchPhase::Level(layers.len())
                    }
                }
                SearchPhase::Terminate => break,
            };
        }

        log::info!(
            "levelwise search finished after {} levels ({termination:?})",
            layers.len()
        );
        SearchOutcome {
            layers,
            infeasible,
            termination,
        }
    }

    fn seed(&self, ground_size: usize) -> (Layer<O::Witness>, Vec<Combination>) {
        let witnesses: Vec<O::Witness> = if self.config.parallel {
            (0..ground_size)
                .into_par_iter()
                .map(|rank| self.oracle.seed(rank))
                .collect()
        } else {
            (0..ground_size).map(|rank| self.oracle.seed(rank)).collect()
        };

        self.partition(
            1,
            (0..ground_size).map(Combination::singleton).zip(witnesses),
        )
    }

    fn evaluate(
        &self,
        previous: &Layer<O::Witness>,
        candidates: Vec<Candidate>,
    ) -> (Layer<O::Witness>, Vec<Combination>) {
        let refine = |candidate: &Candidate| {
            self.oracle.refine(
                &candidate.combination,
                &previous.witnesses[candidate.left],
                &previous.witnesses[candidate.right],
            )
        };
        let witnesses: Vec<O::Witness> = if self.config.parallel {
            candidates.par_iter().map(refine).collect()
        } else {
            candidates.iter().map(refine).collect()
        };

        self.partition(
            previous.size() + 1,
            candidates
                .into_iter()
                .map(|candidate| candidate.combination)
                .zip(witnesses),
        )
    }

    fn partition(
        &self,
        size: usize,
        evaluated: impl Iterator<Item = (Combination, O::Witness)>,
    ) -> (Layer<O::Witness>, Vec<Combination>) {
        let mut layer = Layer::new(size);
        let mut rejected = Vec::new();
        for (combination, witness) in evaluated {
            if self.oracle.is_feasible(&witness) {
                layer.combinations.push(combination);
                layer.witnesses.push(witness);
            } else {
                rejected.push(combination);
            }
        }
        (layer, rejected)
    }
}

/// Runs a levelwise search to completion under `config`.
pub fn search<O: FeasibilityOracle>(oracle: &O, config: SearchConfig) -> SearchOutcome<O::Witness> {
    LevelwiseSearch::new(oracle, config).run()
}
