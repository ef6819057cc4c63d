//! Command line front end.
//!
//! ```text
//! gbdt train   <config.json> <data> <target column> <model out>
//! gbdt predict <config.json> <model> <data> <target column>
//! ```
//! `<data>` is a CSV file (extension `.csv`, with a header row)
//! or a SVMLight file. The target column is ignored for SVMLight files.
//! Set `RUST_LOG=info` to see the progress.
use std::env;
use std::process::ExitCode;

use gbdt::prelude::*;
use gbdt::research::zero_one_loss;


const USAGE: &str = "\
usage:
    gbdt train   <config.json> <data> <target column> <model out>
    gbdt predict <config.json> <model> <data> <target column>";


fn read_dataset(path: &str, target: &str) -> Result<Dataset> {
    SampleReader::new()
        .file(path)
        .has_header(true)
        .target_feature(target)
        .read()
}


fn train(config: &str, data: &str, target: &str, model: &str) -> Result<()> {
    let config = Config::from_json_file(config)?;
    let mut dataset = read_dataset(data, target)?;

    let tree = RegressionTreeBuilder::from_config(&config).build();
    let mut gbdt = GBDT::new(&config, tree)?;
    gbdt.fit(&mut dataset)?;
    gbdt.save_to_file(model)?;

    let loss = config.loss.eval(
        &dataset.labels(),
        &gbdt.predict_all(&dataset),
        &dataset.weights(),
    );
    println!("training loss ({}): {loss}", config.loss);
    println!("model written to {model}");
    Ok(())
}


fn predict(config: &str, model: &str, data: &str, target: &str)
    -> Result<()>
{
    let config = Config::from_json_file(config)?;
    let dataset = read_dataset(data, target)?;

    let tree = RegressionTreeBuilder::from_config(&config).build();
    let gbdt = GBDT::load_from_file(model, &config, tree)?;

    let predictions = gbdt.predict_all(&dataset);
    for p in &predictions {
        println!("{p}");
    }

    let labels = dataset.labels();
    let loss = config.loss.eval(&labels, &predictions, &dataset.weights());
    eprintln!("loss ({}): {loss}", config.loss);
    if config.loss == Loss::Logistic {
        let error = labels.iter()
            .zip(&predictions)
            .map(|(&y, &p)| zero_one_loss(y, p))
            .sum::<f64>()
            / labels.len().max(1) as f64;
        eprintln!("zero-one loss: {error}");
    }
    Ok(())
}


fn main() -> ExitCode {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(String::as_str).collect::<Vec<_>>();
    let result = match args[..] {
        ["train", config, data, target, model] => {
            train(config, data, target, model)
        },
        ["predict", config, model, data, target] => {
            predict(config, model, data, target)
        },
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}
