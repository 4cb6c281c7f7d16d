use rand::Rng;

/// Anything that can be ordered by score
pub trait Scored {
    fn score(&self) -> i64;
}

/// How a batch is picked from the ranked candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Highest scores first
    TopK,
    /// Uniform sample without replacement from the `pool_size` best
    PoolSample { pool_size: usize },
}

/// Stable descending sort; ties keep catalog order
fn rank<T: Scored>(candidates: &mut [T]) {
    candidates.sort_by(|a, b| b.score().cmp(&a.score()));
}

/// Ranks `candidates` and returns at most `batch_size` of them
pub fn rank_and_select<T: Scored, R: Rng + ?Sized>(
    mut candidates: Vec<T>,
    policy: SelectionPolicy,
    batch_size: usize,
    rng: &mut R,
) -> Vec<T> {
    rank(&mut candidates);

    match policy {
        SelectionPolicy::TopK => {
            candidates.truncate(batch_size);
            candidates
        }
        SelectionPolicy::PoolSample { pool_size } => {
            candidates.truncate(pool_size);
            let amount = batch_size.min(candidates.len());

            // Partial Fisher-Yates: the first `amount` slots end up a uniform sample
            for i in 0..amount {
                let j = rng.random_range(i..candidates.len());
                candidates.swap(i, j);
            }
            candidates.truncate(amount);
            candidates
        }
    }
}
