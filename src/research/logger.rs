use colored::Colorize;

use std::time::Instant;


const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// Struct `StageLogger` prints the training loss, the AUC,
/// and the running time for each stage of boosting.
pub struct StageLogger {
    start: Instant,
    header_printed: bool,
}


impl Default for StageLogger {
    fn default() -> Self {
        Self::new()
    }
}


impl StageLogger {
    /// Create a new instance of `StageLogger`.
    /// The clock starts now.
    pub fn new() -> Self {
        Self { start: Instant::now(), header_printed: false, }
    }


    /// Print the settings of the booster and the weak learner.
    pub fn print_stats(
        &self,
        booster: &str,
        booster_info: Option<Vec<(&str, String)>>,
        weak_learner: &str,
        weak_learner_info: Option<Vec<(&str, String)>>,
    )
    {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!("\n{header}");
        for (name, info) in [(booster, booster_info), (weak_learner, weak_learner_info)] {
            println!(
                "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
                "Component".bold(),
                name.bold().green(),
            );
            if let Some(info) = info {
                let line = info.into_iter()
                    .map(|(key, val)| {
                        format!(
                            "    + {:<STAT_WIDTH$}\t{:>width$}",
                            key,
                            val.bold().yellow(),
                            width = STAT_WIDTH - 8
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                println!("{line}");
            }
        }
        println!("{:=^FULL_WIDTH$}\n", "".bold());
    }


    #[inline]
    fn print_log_header(&mut self) {
        if self.header_printed { return; }
        self.header_printed = true;
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "TRAIN".bold().green(),
            "TRAIN".bold().yellow(),
            "".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "STAGE".bold().red(),
            "LOSS".bold().green(),
            "AUC".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }


    /// Print one row for the stage `stage` (0-indexed).
    pub fn log_stage(&mut self, stage: usize, loss: f64, auc: Option<f64>) {
        self.print_log_header();
        let auc = auc.map_or_else(
            || format!("{:>WIDTH$}", "-"),
            |auc| format!("{:>WIDTH$.PREC_WIDTH$}", auc),
        );
        println!(
            "{} {}\t\t{}\t{}\t{}",
            "[LOG]".bold().magenta(),
            format!("{:>WIDTH$}", stage + 1).red(),
            format!("{:>WIDTH$.PREC_WIDTH$}", loss).green(),
            auc.yellow(),
            time_format(self.start.elapsed().as_millis()).bold().cyan(),
        );
    }


    /// Print the final row.
    pub fn finish(&self, stages: usize, loss: f64) {
        println!(
            "{} {}\t\t{}\t{:>WIDTH$}\t{}\n",
            "[FIN]".bold().bright_green(),
            format!("{:>WIDTH$}", stages).red(),
            format!("{:>WIDTH$.PREC_WIDTH$}", loss).bold().green(),
            "",
            time_format(self.start.elapsed().as_millis()).bold().cyan(),
        );
    }
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format_switches_units() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(61_000), " 01m 01s");
        assert_eq!(time_format(3_600_000), " 01h 00m");
    }
}
