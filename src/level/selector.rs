// Round selection: uniform random draws without replacement from the level
// pool. Deliberately uncurated, no recency or difficulty weighting.
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

use super::models::LevelModel;

#[derive(Debug, Clone, Error)]
pub enum SelectionError {
    #[error("Not enough levels to build a game: {available} available, {required} required")]
    InsufficientLevels { available: usize, required: usize },
}

/// Picks `count` distinct level ids uniformly at random from the pool.
///
/// Draws a uniform random index per round and redraws on a duplicate hit,
/// which is equivalent to sampling without replacement. Round order is the
/// order in which indices were first drawn.
pub fn select_level_ids(
    pool: &[LevelModel],
    count: usize,
) -> Result<Vec<String>, SelectionError> {
    if pool.len() < count {
        return Err(SelectionError::InsufficientLevels {
            available: pool.len(),
            required: count,
        });
    }

    let mut rng = rand::rng();
    let mut drawn_indices = HashSet::new();
    let mut selected = Vec::with_capacity(count);

    while selected.len() < count {
        let index = rng.random_range(0..pool.len());
        if drawn_indices.insert(index) {
            selected.push(pool[index].id.clone());
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ROUNDS_PER_GAME;
    use std::collections::HashSet;

    fn pool_of(size: usize) -> Vec<LevelModel> {
        (0..size)
            .map(|i| LevelModel::new(33.79, -117.85, format!("img-{}", i)))
            .collect()
    }

    #[test]
    fn selects_distinct_ids_from_pool() {
        let pool = pool_of(12);
        let pool_ids: HashSet<String> = pool.iter().map(|l| l.id.clone()).collect();

        // Repeat to exercise the redraw path
        for _ in 0..50 {
            let selected = select_level_ids(&pool, ROUNDS_PER_GAME).unwrap();
            assert_eq!(selected.len(), ROUNDS_PER_GAME);

            let unique: HashSet<&String> = selected.iter().collect();
            assert_eq!(unique.len(), ROUNDS_PER_GAME, "selection repeated a level");

            for id in &selected {
                assert!(pool_ids.contains(id), "selected id not in pool");
            }
        }
    }

    #[test]
    fn exact_size_pool_uses_every_level() {
        let pool = pool_of(ROUNDS_PER_GAME);
        let selected = select_level_ids(&pool, ROUNDS_PER_GAME).unwrap();

        let unique: HashSet<&String> = selected.iter().collect();
        assert_eq!(unique.len(), ROUNDS_PER_GAME);
    }

    #[test]
    fn undersized_pool_is_rejected() {
        let pool = pool_of(4);
        let result = select_level_ids(&pool, ROUNDS_PER_GAME);

        match result {
            Err(SelectionError::InsufficientLevels {
                available,
                required,
            }) => {
                assert_eq!(available, 4);
                assert_eq!(required, 5);
            }
            other => panic!("expected InsufficientLevels, got {:?}", other),
        }
    }

    #[test]
    fn empty_pool_is_rejected() {
        let result = select_level_ids(&[], ROUNDS_PER_GAME);
        assert!(matches!(
            result,
            Err(SelectionError::InsufficientLevels { available: 0, .. })
        ));
    }
}
