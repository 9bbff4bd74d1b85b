/// Knobs for a levelwise run. The defaults search the whole lattice and
/// evaluate each level on the rayon pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Largest combination size to evaluate. Level one is always evaluated.
    pub max_level: Option<usize>,
    /// Total number of generated candidates (level two onwards) the oracle
    /// may evaluate.
    pub candidate_budget: Option<usize>,
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_level: None,
            candidate_budget: None,
            parallel: true,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = Some(max_level);
        self
    }

    pub fn with_candidate_budget(mut self, max_candidates: usize) -> Self {
        self.candidate_budget = Some(max_candidates);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
