//! Provides Gradient Boosting Decision Trees ([`GBDT`]) by Friedman, 2001.
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::{
    common::checker,
    research::{roc_auc, StageLogger},
    Booster,
    Config,
    Dataset,
    GbdtError,
    Loss,
    LossFunction,
    Regressor,
    Result,
    Sample,
    WeakLearner,
};

use std::ops::ControlFlow;


/// The value [`GBDT::predict_staged`] returns
/// for an ensemble without a bias,
/// i.e., one that has been neither initialized nor loaded.
pub const UNKNOWN_VALUE: f64 = f64::MIN;


/// Gradient boosting with shrinkage and row subsampling, proposed in:
///
/// [Jerome H. Friedman, 2001 - Greedy Function Approximation: A Gradient Boosting Machine](https://projecteuclid.org/journals/annals-of-statistics/volume-29/issue-5/Greedy-function-approximation-A-gradient-boostingmachine/10.1214/aos/1013203451.full)
///
/// `GBDT` starts from a constant bias and, at each stage,
/// fits one weak learner to the pseudo-residuals of the loss
/// at the current staged prediction.
/// The final prediction is
/// `bias + shrinkage * Σ_i learners[i].predict(x)`.
///
/// The stage slots are allocated once, at construction,
/// by cloning the weak learner given to [`GBDT::new`];
/// training fits them in place, in stage order.
///
///
/// # Example
/// ```no_run
/// use gbdt::prelude::*;
///
/// let mut dataset = SampleReader::new()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// let config = Config::default()
///     .stage_count(50)
///     .shrinkage(0.1)
///     .loss(Loss::Logistic)
///     .sampling_ratio(0.8)
///     .seed(1234);
///
/// let tree = RegressionTreeBuilder::from_config(&config).build();
/// let mut gbdt = GBDT::new(&config, tree).unwrap();
///
/// // Uses `StdRng::seed_from_u64(config.seed)` for the subsampling.
/// gbdt.fit(&mut dataset).unwrap();
///
/// let predictions = gbdt.predict_all(&dataset);
/// let model = gbdt.save().unwrap();
/// ```
pub struct GBDT<W> {
    // Parameters of the run.
    pub(super) config: Config,

    // An unfitted weak learner, cloned into every stage slot.
    pub(super) prototype: W,

    // Stage slots, `config.stage_count` of them
    // unless a header-only model was loaded.
    pub(super) learners: Vec<W>,

    // Established by `init` or `load`.
    pub(super) bias: Option<f64>,

    // Number of leading slots fitted in the current run.
    pub(super) n_fitted: usize,

    // Number of samples used per stage in the current run.
    effective_size: usize,

    // Staged prediction of each sample, aligned with the dataset order.
    scores: Vec<f64>,

    // Per-stage report, only in debug mode.
    logger: Option<StageLogger>,
}


impl<W> GBDT<W>
    where W: WeakLearner,
{
    /// Construct a new `GBDT` with `config.stage_count` slots,
    /// each holding a clone of `prototype`.
    pub fn new(config: &Config, prototype: W) -> Result<Self> {
        config.validate()?;

        let learners = vec![prototype.clone(); config.stage_count];

        Ok(Self {
            config: config.clone(),
            prototype,
            learners,
            bias: None,
            n_fitted: 0,
            effective_size: 0,
            scores: Vec::new(),
            logger: None,
        })
    }


    /// Compute the bias from the full weighted label distribution
    /// and start a fresh run. The stage slots are kept.
    pub fn init(&mut self, dataset: &Dataset) -> Result<()> {
        checker::check_dataset(dataset)?;

        if self.config.loss == Loss::Logistic {
            let odd = dataset.non_binary_labels();
            if !odd.is_empty() {
                log::warn!(
                    "logistic loss expects labels in {{-1, +1}}, found {:?}",
                    odd.iter().take(5).collect::<Vec<_>>(),
                );
            }
        }

        let bias = self.config.loss.bias(
            &dataset.labels(), &dataset.weights(),
        )?;

        self.bias = Some(bias);
        self.n_fitted = 0;
        log::debug!("initial bias ({}): {bias}", self.config.loss);
        Ok(())
    }


    /// Train every stage on `dataset`.
    /// If subsampling is active, `dataset` is shuffled in place
    /// with `rng` before every stage.
    /// If a stage fails, the stages fitted before it are kept
    /// and `n_fitted` counts them.
    pub fn train<R>(&mut self, dataset: &mut Dataset, rng: &mut R)
        -> Result<()>
        where R: Rng,
    {
        let result = self.run(dataset, rng);
        if result.is_err() {
            self.clear_run_state();
        }
        result
    }


    /// Train every stage on `dataset`
    /// with a random number generator seeded by `config.seed`.
    pub fn fit(&mut self, dataset: &mut Dataset) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.train(dataset, &mut rng)
    }


    /// Prediction of the first `n` stages:
    /// `bias + shrinkage * Σ_{i < n} learners[i].predict(sample)`.
    ///
    /// `n` is clamped to the number of fitted stages.
    /// Returns [`UNKNOWN_VALUE`] if the ensemble has no bias yet.
    pub fn predict_staged(&self, sample: &Sample, n: usize) -> f64 {
        let bias = match self.bias {
            Some(bias) => bias,
            None => { return UNKNOWN_VALUE; },
        };

        let n = n.min(self.n_fitted);
        let mut r = bias;
        for learner in &self.learners[..n] {
            r += self.config.shrinkage * learner.predict(sample);
        }
        r
    }


    /// Returns the bias, if established.
    #[inline]
    pub fn bias(&self) -> Option<f64> {
        self.bias
    }


    /// Returns the shrinkage.
    #[inline]
    pub fn shrinkage(&self) -> f64 {
        self.config.shrinkage
    }


    /// Returns the number of stage slots.
    #[inline]
    pub fn stage_count(&self) -> usize {
        self.learners.len()
    }


    /// Returns the number of fitted stages.
    #[inline]
    pub fn n_fitted(&self) -> usize {
        self.n_fitted
    }


    /// Returns `true` if every stage is fitted and the bias is set.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.bias.is_some() && self.n_fitted == self.learners.len()
    }


    /// Returns the stage slots in stage order.
    #[inline]
    pub fn learners(&self) -> &[W] {
        &self.learners[..]
    }


    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }


    /// Number of samples used per stage for a dataset of `n_sample`.
    #[inline]
    fn subsample_size(&self, n_sample: usize) -> usize {
        if self.config.sampling_ratio < 1.0 {
            (self.config.sampling_ratio * n_sample as f64).floor() as usize
        } else {
            n_sample
        }
    }


    /// Shuffle the whole dataset in place (Fisher-Yates),
    /// moving the cached scores along with their samples.
    fn shuffle<R>(&mut self, dataset: &mut Dataset, rng: &mut R)
        where R: Rng,
    {
        let samples = dataset.samples_mut();
        for i in (1..samples.len()).rev() {
            let j = rng.gen_range(0..=i);
            samples.swap(i, j);
            self.scores.swap(i, j);
        }
    }


    /// Drop the cached scores and the stage report of the current run.
    #[inline]
    fn clear_run_state(&mut self) {
        self.scores = Vec::new();
        self.effective_size = 0;
        self.logger = None;
    }


    /// Weighted training loss and AUC of the current ensemble
    /// on the first `self.effective_size` samples.
    fn diagnostics(&self, samples: &[Sample]) -> (f64, Option<f64>) {
        let size = self.effective_size;
        let labels = samples[..size].iter()
            .map(|s| s.label)
            .collect::<Vec<_>>();
        let weights = samples[..size].iter()
            .map(|s| s.weight)
            .collect::<Vec<_>>();
        let scores = &self.scores[..size];

        let loss = self.config.loss.eval(&labels, scores, &weights);
        let auc = match self.config.loss {
            Loss::Logistic => roc_auc(&labels, scores),
            Loss::LeastSquares => None,
        };
        (loss, auc)
    }
}


impl<W> Booster for GBDT<W>
    where W: WeakLearner,
{
    fn name(&self) -> &str {
        "Gradient Boosting Decision Trees"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of stages", format!("{}", self.config.stage_count)),
            ("Shrinkage", format!("{}", self.config.shrinkage)),
            ("Loss", format!("{}", self.config.loss)),
            ("Sampling ratio", format!("{}", self.config.sampling_ratio)),
            ("Seed", format!("{}", self.config.seed)),
        ]);
        Some(info)
    }


    fn preprocess(&mut self, dataset: &Dataset) -> Result<()> {
        self.clear_run_state();
        self.init(dataset)?;

        let n_sample = dataset.len();
        let effective_size = self.subsample_size(n_sample);
        if effective_size == 0 {
            return Err(GbdtError::degenerate_dataset(format!(
                "sampling ratio {} selects no sample out of {n_sample}",
                self.config.sampling_ratio,
            )));
        }
        self.effective_size = effective_size;

        let bias = self.bias.unwrap_or_default();
        self.scores = vec![bias; n_sample];

        log::info!(
            "training {} stages on {effective_size}/{n_sample} samples per stage",
            self.learners.len(),
        );

        self.logger = if self.config.debug {
            let logger = StageLogger::new();
            logger.print_stats(
                self.name(),
                self.info(),
                self.prototype.name(),
                self.prototype.info(),
            );
            Some(logger)
        } else {
            None
        };
        Ok(())
    }


    fn boost<R>(
        &mut self,
        dataset: &mut Dataset,
        rng: &mut R,
        stage: usize,
    ) -> Result<ControlFlow<usize>>
        where R: Rng,
    {
        let stage_count = self.learners.len();
        if stage >= stage_count {
            return Ok(ControlFlow::Break(stage_count));
        }

        if self.config.sampling_ratio < 1.0 {
            self.shuffle(dataset, rng);
        }


        // Pseudo-residuals at the prediction of stages `0..stage`.
        let size = self.effective_size;
        let samples = dataset.samples();
        let loss = self.config.loss;
        let targets = samples[..size].iter()
            .zip(&self.scores[..size])
            .map(|(sample, &score)| loss.gradient(sample.label, score))
            .collect::<Vec<_>>();


        let learner = &mut self.learners[stage];
        learner.fit(&samples[..size], &targets)?;
        self.n_fitted = stage + 1;


        // Same summation order as `predict_staged`.
        let shrinkage = self.config.shrinkage;
        let learner = &self.learners[stage];
        self.scores.iter_mut()
            .zip(samples)
            .for_each(|(score, sample)| {
                *score += shrinkage * learner.predict(sample);
            });


        log::debug!("stage {}/{stage_count} fitted", stage + 1);
        if self.config.debug {
            let (loss, auc) = self.diagnostics(samples);
            log::debug!("stage {}: training loss {loss}, auc {auc:?}", stage + 1);
            if let Some(logger) = self.logger.as_mut() {
                logger.log_stage(stage, loss, auc);
            }
        }

        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self, dataset: &Dataset) -> Result<()> {
        if let Some(logger) = self.logger.take() {
            let (loss, _) = self.diagnostics(dataset.samples());
            logger.finish(self.n_fitted, loss);
        }

        self.clear_run_state();
        log::info!("training finished: {} stages fitted", self.n_fitted);
        Ok(())
    }
}


impl<W> Regressor for GBDT<W>
    where W: WeakLearner,
{
    /// Prediction of the full ensemble.
    #[inline]
    fn predict(&self, sample: &Sample) -> f64 {
        self.predict_staged(sample, self.learners.len())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Predicts `1.0`; fails on its second `fit`,
    /// counted across clones.
    #[derive(Clone)]
    struct FailsOnSecondFit {
        fits: std::rc::Rc<std::cell::Cell<usize>>,
    }


    impl Regressor for FailsOnSecondFit {
        fn predict(&self, _sample: &Sample) -> f64 {
            1.0
        }
    }


    impl WeakLearner for FailsOnSecondFit {
        fn name(&self) -> &str {
            "Fails on second fit"
        }


        fn fit(&mut self, _samples: &[Sample], _targets: &[f64])
            -> Result<()>
        {
            let n = self.fits.get() + 1;
            self.fits.set(n);
            if n == 2 {
                return Err(GbdtError::degenerate_dataset("second fit"));
            }
            Ok(())
        }


        fn save(&self) -> String {
            String::new()
        }


        fn load(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }


    #[test]
    fn failed_stage_drops_the_run_state() {
        let samples = (0..4)
            .map(|i| Sample::new(vec![i as f64], if i < 2 { 1.0 } else { -1.0 }))
            .collect();
        let mut dataset = Dataset::new(samples).unwrap();
        let config = Config::default().stage_count(3).debug(true);
        let learner = FailsOnSecondFit { fits: Default::default() };
        let mut gbdt = GBDT::new(&config, learner).unwrap();

        assert!(gbdt.fit(&mut dataset).is_err());
        assert!(gbdt.scores.is_empty());
        assert!(gbdt.logger.is_none());
        assert_eq!(gbdt.effective_size, 0);

        // The first stage stays usable.
        assert_eq!(gbdt.n_fitted(), 1);
        assert!(!gbdt.is_trained());
        assert_eq!(gbdt.predict_staged(&dataset[0], 3), 0.1);
    }
}
