//! Provides `Booster` trait.

use rand::Rng;

use crate::{Dataset, Result};

use std::ops::ControlFlow;


/// The trait [`Booster`] defines the standard framework of staged boosting.
///
/// You need to implement [`Booster::preprocess`],
/// [`Booster::boost`],
/// and [`Booster::postprocess`]
/// to write a new boosting algorithm.
pub trait Booster {
    /// Returns the name of the boosting algorithm.
    fn name(&self) -> &str;


    /// Returns the information of boosting algorithm as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// A main function that runs boosting algorithm.
    /// Stages are numbered from `0`.
    fn run<R>(&mut self, dataset: &mut Dataset, rng: &mut R) -> Result<()>
        where R: Rng,
    {
        self.preprocess(dataset)?;

        let mut stage = 0;
        while let ControlFlow::Continue(()) = self.boost(dataset, rng, stage)? {
            stage += 1;
        }

        self.postprocess(dataset)
    }


    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`],
    /// this method is called before the boosting process.
    fn preprocess(&mut self, dataset: &Dataset) -> Result<()>;


    /// Boosting step per stage.
    /// This method returns
    /// `ControlFlow::Continue(())` while stages remain,
    /// `ControlFlow::Break(n_stages)` otherwise.
    fn boost<R>(
        &mut self,
        dataset: &mut Dataset,
        rng: &mut R,
        stage: usize,
    ) -> Result<ControlFlow<usize>>
        where R: Rng;


    /// Post-processing.
    fn postprocess(&mut self, dataset: &Dataset) -> Result<()>;
}
