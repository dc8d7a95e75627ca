//! Vote reductions over an ordered neighbor set.
//!
//! Both rules tally labels in the order their first neighbor appears and then
//! keep the first label to reach the maximum, replacing the leader only on a
//! strictly greater total. Since neighbors arrive in ascending-distance order,
//! a tie goes to the label of the closest tied neighbor.

use canvas_helpers::Float;
use num_traits::Zero;

/// Outcome of a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction<L> {
    /// The winning label.
    Label(L),
    /// There were no neighbors to vote.
    Indeterminate,
}

impl<L> Prediction<L> {
    pub fn label(&self) -> Option<&L> {
        match self {
            Prediction::Label(label) => Some(label),
            Prediction::Indeterminate => None,
        }
    }

    pub fn into_label(self) -> Option<L> {
        match self {
            Prediction::Label(label) => Some(label),
            Prediction::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Prediction::Indeterminate)
    }
}

/// Majority vote over labels given in ascending-distance order.
pub fn majority_vote<'a, L, I>(labels: I) -> Prediction<L>
where
    L: PartialEq + Clone + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let mut tally: Vec<(&L, usize)> = Vec::new();
    for label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }
    leader(tally)
}

/// Inverse-distance weighted vote over `(label, distance)` pairs given in
/// ascending-distance order.
///
/// Each neighbor contributes `1 / distance` to its label. A neighbor at
/// distance zero wins outright for its label.
pub fn weighted_vote<'a, L, F, I>(neighbors: I) -> Prediction<L>
where
    L: PartialEq + Clone + 'a,
    F: Float,
    I: IntoIterator<Item = (&'a L, F)>,
{
    let mut tally: Vec<(&L, F)> = Vec::new();
    for (label, distance) in neighbors {
        if distance.is_zero() {
            return Prediction::Label(label.clone());
        }
        let weight = distance.recip();
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, total)) => *total += weight,
            None => tally.push((label, weight)),
        }
    }
    leader(tally)
}

fn leader<L, W>(tally: Vec<(&L, W)>) -> Prediction<L>
where
    L: Clone,
    W: PartialOrd + Copy,
{
    let mut best: Option<(&L, W)> = None;
    for (label, score) in tally {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((label, score)),
        }
    }
    match best {
        Some((label, _)) => Prediction::Label(label.clone()),
        None => Prediction::Indeterminate,
    }
}
