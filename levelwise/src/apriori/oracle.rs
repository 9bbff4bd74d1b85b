use super::combination::Combination;

/// Decides whether a combination is eligible for extension.
///
/// The driver seeds level one with [`FeasibilityOracle::seed`] and builds every
/// later witness from the witnesses of the two generating parents, so an
/// oracle never has to go back to raw data after the first level.
pub trait FeasibilityOracle: Sync {
    type Witness: Send + Sync;

    /// Number of ground elements; ranks run over `0..ground_size()`.
    fn ground_size(&self) -> usize;

    fn seed(&self, rank: usize) -> Self::Witness;

    fn refine(
        &self,
        candidate: &Combination,
        left: &Self::Witness,
        right: &Self::Witness,
    ) -> Self::Witness;

    fn is_feasible(&self, witness: &Self::Witness) -> bool;
}
