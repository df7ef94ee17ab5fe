//! Epsilon-greedy action selection

use rand::Rng;

use crate::{Result, linear::model::LinearQModel};

/// Choose a flat action index for `state`.
///
/// With probability `epsilon` the action category and the object are drawn
/// independently and uniformly; otherwise the greedy action (first index on
/// ties) of the current model is returned.
pub fn epsilon_greedy<R: Rng>(
    model: &LinearQModel,
    state: &[f64],
    epsilon: f64,
    rng: &mut R,
) -> Result<usize> {
    model.check_state(state, "action selection")?;
    let coin: f64 = rng.random();
    if coin < epsilon {
        let space = model.action_space();
        let action = rng.random_range(0..space.num_actions());
        let object = rng.random_range(0..space.num_objects());
        space.encode(action, object)
    } else {
        model.greedy_action(state)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::linear::codec::ActionSpace;

    fn model_with_rows(rows: &[[f64; 2]]) -> LinearQModel {
        let space = ActionSpace::new(rows.len(), 1).unwrap();
        let weights = rows.iter().flat_map(|row| row.iter().copied()).collect();
        LinearQModel::from_weights(space, 2, weights).unwrap()
    }

    #[test]
    fn test_greedy_is_deterministic() {
        let model = model_with_rows(&[[0.1, 0.0], [0.0, 0.9], [0.5, 0.5]]);
        let state = [1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(epsilon_greedy(&model, &state, 0.0, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_greedy_breaks_ties_by_first_index() {
        let model = LinearQModel::zeros(ActionSpace::new(3, 3).unwrap(), 4);
        let mut rng = StdRng::seed_from_u64(9);
        let choice = epsilon_greedy(&model, &[1.0, 0.0, 2.0, 0.0], 0.0, &mut rng).unwrap();
        assert_eq!(choice, 0);
    }

    #[test]
    fn test_greedy_follows_nan_row() {
        let model =
            LinearQModel::from_weights(ActionSpace::new(1, 2).unwrap(), 1, vec![f64::NAN, -1.0])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(epsilon_greedy(&model, &[1.0], 0.0, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_full_exploration_covers_the_space() {
        let model = LinearQModel::zeros(ActionSpace::new(2, 3).unwrap(), 1);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let index = epsilon_greedy(&model, &[1.0], 1.0, &mut rng).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let model = LinearQModel::zeros(ActionSpace::new(4, 5).unwrap(), 1);
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(
                epsilon_greedy(&model, &[1.0], 0.5, &mut a).unwrap(),
                epsilon_greedy(&model, &[1.0], 0.5, &mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_wrong_state_shape_is_fatal() {
        let model = LinearQModel::zeros(ActionSpace::new(2, 2).unwrap(), 3);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(epsilon_greedy(&model, &[1.0], 1.0, &mut rng).is_err());
    }
}
