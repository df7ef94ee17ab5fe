//! Property tests for the action codec and the TD update

use proptest::prelude::*;
use questlearn::{
    ActionSpace, Error, LinearQModel,
    linear::{TdParams, Transition, td_update},
};

proptest! {
    #[test]
    fn encode_decode_is_a_bijection(
        num_actions in 1usize..20,
        num_objects in 1usize..20,
        seed in any::<usize>(),
    ) {
        let space = ActionSpace::new(num_actions, num_objects).unwrap();
        let index = seed % space.len();

        let (action, object) = space.decode(index).unwrap();
        prop_assert!(action < num_actions);
        prop_assert!(object < num_objects);
        prop_assert_eq!(space.encode(action, object).unwrap(), index);
    }

    #[test]
    fn decode_inverts_encode(
        (num_actions, num_objects, action, object) in (1usize..20, 1usize..20)
            .prop_flat_map(|(a, o)| (Just(a), Just(o), 0..a, 0..o)),
    ) {
        let space = ActionSpace::new(num_actions, num_objects).unwrap();
        let index = space.encode(action, object).unwrap();
        prop_assert!(index < space.len());
        prop_assert_eq!(space.decode(index).unwrap(), (action, object));
    }

    #[test]
    fn out_of_range_indices_are_rejected(
        num_actions in 1usize..20,
        num_objects in 1usize..20,
        excess in 0usize..100,
    ) {
        let space = ActionSpace::new(num_actions, num_objects).unwrap();
        let is_invalid_index = matches!(
            space.decode(space.len() + excess),
            Err(Error::InvalidActionIndex { .. })
        );
        prop_assert!(is_invalid_index);
        let is_invalid_category = matches!(
            space.encode(num_actions + excess, 0),
            Err(Error::InvalidActionCategory { .. })
        );
        prop_assert!(is_invalid_category);
    }

    #[test]
    fn terminal_update_moves_q_toward_reward(
        reward in -100.0f64..100.0,
        start in -10.0f64..10.0,
        learning_rate in 0.01f64..1.0,
    ) {
        let space = ActionSpace::new(1, 2).unwrap();
        let mut model = LinearQModel::from_weights(space, 1, vec![start, 0.0]).unwrap();
        let transition = Transition {
            state: &[1.0],
            action: 0,
            reward,
            next_state: &[0.0],
            terminal: true,
        };
        let params = TdParams { learning_rate, discount: 0.9 };

        td_update(&mut model, &transition, params).unwrap();

        // With a unit feature and α <= 1 the new value lies between old and target.
        let q = model.weights()[0];
        prop_assert!(q >= start.min(reward) - 1e-9 && q <= start.max(reward) + 1e-9);
        prop_assert_eq!(model.weights()[1], 0.0);
    }
}
