use gbdt::prelude::*;


// Two features; the target is a step on the second one.
// The first one is a shuffled copy of the index.
//
//  target
//   3 |        o o o
//     |
//   1 |  o o o
//     |______________ feature 1
//        0 1 2 3 4 5
fn two_level() -> (Vec<Sample>, Vec<f64>) {
    let shuffled = [0.0, 3.0, 1.0, 4.0, 2.0, 5.0];
    let samples = (0..6)
        .map(|i| Sample::new(vec![shuffled[i], i as f64], 0.0))
        .collect::<Vec<_>>();
    let targets = (0..6)
        .map(|i| if i < 3 { 1.0 } else { 3.0 })
        .collect::<Vec<_>>();
    (samples, targets)
}


#[cfg(test)]
pub mod regression_tree {
    use super::*;

    #[test]
    fn splits_on_the_informative_feature() {
        let (samples, targets) = two_level();
        let mut tree = RegressionTreeBuilder::new().max_depth(3).build();
        tree.fit(&samples, &targets).unwrap();

        assert_eq!(tree.leaves(), 2);
        assert_eq!(tree.depth(), 1);
        let probe = Sample::new(vec![0.0, 2.4], 0.0);
        assert_eq!(tree.predict(&probe), 1.0);
        let probe = Sample::new(vec![0.0, 2.6], 0.0);
        assert_eq!(tree.predict(&probe), 3.0);
    }


    #[test]
    fn depth_never_exceeds_the_limit() {
        let samples = (0..32)
            .map(|i| Sample::new(vec![i as f64], 0.0))
            .collect::<Vec<_>>();
        let targets = (0..32)
            .map(|i| (i * i % 17) as f64)
            .collect::<Vec<_>>();

        for max_depth in 1..=4 {
            let mut tree = RegressionTreeBuilder::new()
                .max_depth(max_depth)
                .build();
            tree.fit(&samples, &targets).unwrap();
            assert!(tree.depth() <= max_depth);
            assert!(tree.leaves() <= 1 << max_depth);
        }
    }


    #[test]
    fn zero_weight_samples_do_not_move_leaves() {
        let samples = vec![
            Sample::new(vec![0.0], 0.0),
            Sample::new(vec![0.0], 0.0).with_weight(0.0),
        ];
        let targets = vec![4.0, 100.0];
        let mut tree = RegressionTree::default();
        tree.fit(&samples, &targets).unwrap();
        assert_eq!(tree.predict(&samples[0]), 4.0);
    }


    #[test]
    fn min_weight_blocks_light_leaves() {
        let (samples, targets) = two_level();
        let mut tree = RegressionTreeBuilder::new()
            .min_weight(3.5)
            .build();
        tree.fit(&samples, &targets).unwrap();
        assert_eq!(tree.leaves(), 1);
        assert_eq!(tree.predict(&samples[0]), 2.0);
    }


    #[test]
    fn payload_round_trip_is_exact() {
        let (samples, targets) = two_level();
        let mut tree = RegressionTree::default();
        tree.fit(&samples, &targets).unwrap();

        let payload = tree.save();
        assert!(!payload.contains('\n'));

        let mut restored = RegressionTree::default();
        restored.load(&payload).unwrap();
        for sample in &samples {
            assert_eq!(tree.predict(sample), restored.predict(sample));
        }
    }


    #[test]
    fn payload_must_be_a_tree() {
        let mut tree = RegressionTree::default();
        let err = tree.load("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GbdtError::LearnerParse { .. }));
    }


    #[test]
    fn refit_replaces_the_tree() {
        let (samples, targets) = two_level();
        let mut tree = RegressionTree::default();
        tree.fit(&samples, &targets).unwrap();
        tree.fit(&samples, &vec![5.0; 6]).unwrap();
        assert_eq!(tree.leaves(), 1);
        assert_eq!(tree.predict(&samples[0]), 5.0);
    }
}
