use gbdt::prelude::*;
use gbdt::SEPARATOR;


/// A constant learner whose payload breaks the segment grammar.
#[derive(Clone)]
struct SplitPayload;


impl Regressor for SplitPayload {
    fn predict(&self, _sample: &Sample) -> f64 {
        0.0
    }
}


impl WeakLearner for SplitPayload {
    fn name(&self) -> &str {
        "Split payload"
    }


    fn fit(&mut self, _samples: &[Sample], _targets: &[f64]) -> Result<()> {
        Ok(())
    }


    fn save(&self) -> String {
        ["left", "right"].join(SEPARATOR)
    }


    fn load(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}


fn trained(stage_count: usize) -> (GBDT<RegressionTree>, Dataset) {
    let samples = (0..40)
        .map(|i| {
            let x = i as f64 / 4.0;
            Sample::new(vec![x, (i % 3) as f64], (x * 0.7).cos() + 2.0)
        })
        .collect();
    let mut data = Dataset::new(samples).unwrap();

    let config = Config::default()
        .stage_count(stage_count)
        .shrinkage(0.25);
    let tree = RegressionTreeBuilder::from_config(&config).build();
    let mut gbdt = GBDT::new(&config, tree).unwrap();
    gbdt.fit(&mut data).unwrap();
    (gbdt, data)
}


#[cfg(test)]
pub mod save_load {
    use super::*;

    #[test]
    fn round_trip_agrees_within_rounding() {
        let (gbdt, data) = trained(8);
        let text = gbdt.save().unwrap();

        let config = Config::default();
        let mut restored = GBDT::new(&config, RegressionTree::default())
            .unwrap();
        restored.load(&text).unwrap();

        assert_eq!(restored.stage_count(), 8);
        assert_eq!(restored.n_fitted(), 8);
        assert_eq!(restored.shrinkage(), 0.25);
        assert_eq!(restored.config().stage_count, 8);
        for sample in &data {
            let diff = gbdt.predict(sample) - restored.predict(sample);
            assert!(diff.abs() < 1e-4, "diff = {diff}");
        }
        assert_eq!(restored.save().unwrap(), text);
    }


    #[test]
    fn header_has_four_decimals() {
        let (gbdt, _) = trained(2);
        let text = gbdt.save().unwrap();
        let segments = text.split(SEPARATOR).collect::<Vec<_>>();

        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], "0.2500");
        let bias = format!("{:.4}", gbdt.bias().unwrap());
        assert_eq!(segments[1], bias);
    }


    #[test]
    fn stage_count_follows_the_segments() {
        let (gbdt, data) = trained(3);
        let text = gbdt.save().unwrap();

        // Drop the last stage.
        let segments = text.split(SEPARATOR).collect::<Vec<_>>();
        let shorter = segments[..4].join(SEPARATOR);

        let config = Config::default().stage_count(10);
        let mut restored = GBDT::new(&config, RegressionTree::default())
            .unwrap();
        restored.load(&shorter).unwrap();
        assert_eq!(restored.stage_count(), 2);

        let expected = gbdt.predict_staged(&data[0], 2);
        assert!((restored.predict(&data[0]) - expected).abs() < 1e-4);
    }


    #[test]
    fn header_only_model_predicts_the_bias() {
        let text = ["0.1000", "1.5000"].join(SEPARATOR);
        let config = Config::default();
        let mut gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        gbdt.load(&text).unwrap();

        assert_eq!(gbdt.stage_count(), 0);
        assert_eq!(gbdt.predict(&Sample::new(vec![3.0], 0.0)), 1.5);
    }


    #[test]
    fn too_few_segments_is_a_parse_error() {
        let config = Config::default();
        let mut gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        for text in ["", "0.1000"] {
            let err = gbdt.load(text).unwrap_err();
            assert!(matches!(err, GbdtError::ModelParse { .. }));
        }
        // A failed load leaves the ensemble untouched.
        assert_eq!(gbdt.bias(), None);
        assert_eq!(gbdt.stage_count(), config.stage_count);
    }


    #[test]
    fn bad_header_is_a_parse_error() {
        let config = Config::default();
        let mut gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        for text in ["abc\n;\n0.5000", "0.1000\n;\nNaN", "0.1000\n;\ninf"] {
            let err = gbdt.load(text).unwrap_err();
            assert!(matches!(err, GbdtError::ModelParse { .. }), "{err}");
        }
    }


    #[test]
    fn non_positive_shrinkage_is_a_parse_error() {
        let config = Config::default();
        let mut gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        for text in ["-2.0000\n;\n0.0000", "0.0000\n;\n0.0000"] {
            let err = gbdt.load(text).unwrap_err();
            assert!(
                matches!(
                    err,
                    GbdtError::ModelParse { ref field, .. } if field == "shrinkage"
                ),
                "{err}"
            );
        }
        assert_eq!(gbdt.bias(), None);
        assert_eq!(gbdt.shrinkage(), config.shrinkage);
    }


    #[test]
    fn loaded_config_stays_valid() {
        let config = Config::default().stage_count(7);
        let mut gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        gbdt.load("0.3000\n;\n1.0000").unwrap();

        assert_eq!(gbdt.stage_count(), 0);
        assert!(gbdt.config().validate().is_ok());
        assert_eq!(gbdt.config().shrinkage, 0.3);
        assert!(GBDT::new(gbdt.config(), RegressionTree::default()).is_ok());

        let (trained, _) = trained(3);
        gbdt.load(&trained.save().unwrap()).unwrap();
        assert_eq!(gbdt.config().stage_count, 3);
        assert!(gbdt.config().validate().is_ok());
    }


    #[test]
    fn separator_in_a_payload_fails_the_save() {
        let samples = vec![
            Sample::new(vec![0.0], 1.0),
            Sample::new(vec![1.0], 2.0),
        ];
        let mut data = Dataset::new(samples).unwrap();
        let config = Config::default().stage_count(2);
        let mut gbdt = GBDT::new(&config, SplitPayload).unwrap();
        gbdt.fit(&mut data).unwrap();

        let err = gbdt.save().unwrap_err();
        assert!(matches!(err, GbdtError::PayloadSeparator { stage: 0 }));
    }


    #[test]
    fn bad_payload_is_a_learner_error() {
        let text = ["0.1000", "0.0000", "{not a tree"].join(SEPARATOR);
        let config = Config::default();
        let mut gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        let err = gbdt.load(&text).unwrap_err();
        assert!(matches!(err, GbdtError::LearnerParse { .. }));
    }


    #[test]
    fn untrained_ensemble_cannot_be_saved() {
        let config = Config::default().stage_count(3);
        let gbdt = GBDT::new(&config, RegressionTree::default()).unwrap();
        let err = gbdt.save().unwrap_err();
        assert!(matches!(
            err, GbdtError::Untrained { fitted: 0, expected: 3 }
        ));
    }


    #[test]
    fn file_round_trip() {
        let (gbdt, data) = trained(4);
        let mut path = std::env::temp_dir();
        path.push(format!("gbdt-model-{}.txt", std::process::id()));

        gbdt.save_to_file(&path).unwrap();
        let config = Config::default();
        let restored = GBDT::load_from_file(
            &path, &config, RegressionTree::default(),
        ).unwrap();
        std::fs::remove_file(&path).unwrap();

        for sample in &data {
            assert!((gbdt.predict(sample) - restored.predict(sample)).abs() < 1e-4);
        }
    }
}
