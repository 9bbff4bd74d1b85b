use std::sync::atomic::{AtomicUsize, Ordering};

/// Caps how many generated candidates a run may hand to its oracle.
#[derive(Debug)]
pub struct CandidateBudget {
    max_candidates: usize,
    spent: AtomicUsize,
}

impl CandidateBudget {
    pub fn new(max_candidates: usize) -> Self {
        Self {
            max_candidates,
            spent: AtomicUsize::new(0),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    /// Claims `count` evaluations, or nothing if that would overdraw.
    pub fn reserve(&self, count: usize) -> Result<(), BudgetExceeded> {
        let previous = self.spent.fetch_add(count, Ordering::SeqCst);
        if previous.saturating_add(count) > self.max_candidates {
            self.spent.fetch_sub(count, Ordering::SeqCst);
            return Err(BudgetExceeded {
                requested: count,
                available: self.max_candidates.saturating_sub(previous),
            });
        }
        Ok(())
    }

    pub fn spent(&self) -> usize {
        self.spent.load(Ordering::SeqCst)
    }

    pub fn available(&self) -> usize {
        self.max_candidates.saturating_sub(self.spent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetExceeded {
    pub requested: usize,
    pub available: usize,
}

impl std::fmt::Display for BudgetExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "candidate budget exceeded: requested {}, {} available",
            self.requested, self.available
        )
    }
}

impl std::error::Error for BudgetExceeded {}
