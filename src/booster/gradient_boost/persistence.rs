//! Text encoding of a [`GBDT`] ensemble.
//!
//! The encoding is a sequence of segments joined by [`SEPARATOR`]:
//!
//! ```text
//! <shrinkage, 4 decimals>
//! ;
//! <bias, 4 decimals>
//! ;
//! <payload of stage 0>
//! ;
//! ...
//! ;
//! <payload of stage N-1>
//! ```
//!
//! The number of stages is not stored;
//! it is the number of segments minus two.
use std::fs;
use std::path::Path;

use super::gbdt::GBDT;
use crate::common::checker;
use crate::{Config, GbdtError, Result, WeakLearner};


/// The separator between two segments of a saved ensemble.
pub const SEPARATOR: &str = "\n;\n";


impl<W> GBDT<W>
    where W: WeakLearner,
{
    /// Encode the whole ensemble as text.
    /// Fails with [`GbdtError::Untrained`] unless every stage is fitted.
    pub fn save(&self) -> Result<String> {
        let bias = match self.bias() {
            Some(bias) if self.is_trained() => bias,
            _ => {
                return Err(GbdtError::Untrained {
                    fitted: self.n_fitted(),
                    expected: self.stage_count(),
                });
            },
        };

        let mut segments = Vec::with_capacity(self.stage_count() + 2);
        segments.push(format!("{:.4}", self.shrinkage()));
        segments.push(format!("{:.4}", bias));
        for (stage, learner) in self.learners().iter().enumerate() {
            let payload = learner.save();
            if payload.contains(SEPARATOR) {
                return Err(GbdtError::PayloadSeparator { stage });
            }
            segments.push(payload);
        }

        Ok(segments.join(SEPARATOR))
    }


    /// Restore the ensemble from the text produced by [`GBDT::save`].
    /// The number of stages becomes `segments - 2`.
    /// The shrinkage must be positive.
    /// On error, `self` is left unchanged.
    pub fn load(&mut self, text: &str) -> Result<()> {
        let segments = text.split(SEPARATOR).collect::<Vec<_>>();
        if segments.len() < 2 {
            return Err(GbdtError::model_parse(
                "header",
                format!(
                    "expected at least 2 segments, found {}",
                    segments.len()
                ),
            ));
        }

        let shrinkage = parse_header("shrinkage", segments[0])?;
        checker::check_shrinkage(shrinkage)
            .map_err(|_| GbdtError::model_parse(
                "shrinkage", format!("{shrinkage} is not positive"),
            ))?;
        let bias = parse_header("bias", segments[1])?;

        let learners = segments[2..].iter()
            .map(|payload| {
                let mut learner = self.prototype.clone();
                learner.load(payload)?;
                Ok(learner)
            })
            .collect::<Result<Vec<_>>>()?;

        let stage_count = learners.len();
        // A header-only model keeps the configured stage count,
        // so that `config()` stays a valid `Config`.
        if stage_count > 0 {
            self.config.stage_count = stage_count;
        }
        self.config.shrinkage = shrinkage;
        self.learners = learners;
        self.bias = Some(bias);
        self.n_fitted = stage_count;

        log::info!("loaded an ensemble of {stage_count} stages");
        Ok(())
    }


    /// Write [`GBDT::save`] to `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.save()?;
        fs::write(path, text)?;
        Ok(())
    }


    /// Read an ensemble saved at `path`.
    /// `config` supplies everything the text does not store
    /// (loss, sampling ratio, ...); `prototype` is cloned
    /// into every stage before it loads its payload.
    pub fn load_from_file<P>(path: P, config: &Config, prototype: W)
        -> Result<Self>
        where P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let mut gbdt = Self::new(config, prototype)?;
        gbdt.load(&text)?;
        Ok(gbdt)
    }
}


fn parse_header(field: &str, segment: &str) -> Result<f64> {
    let value = segment.trim()
        .parse::<f64>()
        .map_err(|e| GbdtError::model_parse(
            field, format!("cannot parse `{segment}` ({e})"),
        ))?;
    if !value.is_finite() {
        return Err(GbdtError::model_parse(
            field, format!("{value} is not finite"),
        ));
    }
    Ok(value)
}
