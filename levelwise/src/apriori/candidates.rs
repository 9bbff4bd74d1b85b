use super::combination::Combination;

/// A size-(k+1) combination together with the positions of its two
/// generating parents in the eligible layer it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub combination: Combination,
    pub left: usize,
    pub right: usize,
}

/// Joins eligible size-k combinations that share their first k-1 ranks and
/// keeps a join only if all of its size-k subsets are eligible too.
///
/// `eligible` must be sorted and hold combinations of one size. The output is
/// sorted and duplicate free.
pub fn generate_candidates(eligible: &[Combination]) -> Vec<Candidate> {
    debug_assert!(eligible.windows(2).all(|pair| pair[0] < pair[1]));
    debug_assert!(eligible.windows(2).all(|pair| pair[0].len() == pair[1].len()));

    let mut candidates = Vec::new();

    for (left, base) in eligible.iter().enumerate() {
        // Sorted input keeps every combination sharing `base`'s prefix in one run.
        for (offset, partner) in eligible[left + 1..].iter().enumerate() {
            if partner.prefix() != base.prefix() {
                break;
            }
            let Some(last) = partner.last() else {
                break;
            };

            let combination = base.extended(last);
            if has_eligible_subsets(&combination, eligible) {
                candidates.push(Candidate {
                    combination,
                    left,
                    right: left + 1 + offset,
                });
            }
        }
    }

    candidates
}

/// Checks the subsets that were not used for the join. Dropping either of the
/// last two ranks yields a generating parent, which is eligible already.
fn has_eligible_subsets(combination: &Combination, eligible: &[Combination]) -> bool {
    let parents_from = combination.len().saturating_sub(2);
    (0..parents_from).all(|index| eligible.binary_search(&combination.without(index)).is_ok())
}
