use crate::random::RandomSource;

/// How many replacements a message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Desired {
    Exactly(usize),
    All,
}

/// Map one uniform draw in `[0, 1)` onto the replacement-count table:
/// 90% one word, 5% two, 3% three, 1% four, 1% every eligible word.
pub fn desired_count(draw: f64) -> Desired {
    if draw < 0.90 {
        Desired::Exactly(1)
    } else if draw < 0.95 {
        Desired::Exactly(2)
    } else if draw < 0.98 {
        Desired::Exactly(3)
    } else if draw < 0.99 {
        Desired::Exactly(4)
    } else {
        Desired::All
    }
}

/// In-place Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Pick which eligible token indices get replaced.
///
/// The weighted draw is a request; the result never holds more than
/// `max_replacements` indices nor more than were eligible.
pub fn select_targets(
    mut eligible: Vec<usize>,
    max_replacements: usize,
    rng: &mut dyn RandomSource,
) -> Vec<usize> {
    shuffle(&mut eligible, rng);

    let desired = match desired_count(rng.next_f64()) {
        Desired::Exactly(n) => n,
        Desired::All => eligible.len(),
    };
    let count = desired.min(eligible.len()).min(max_replacements);

    eligible.truncate(count);
    eligible
}
