//! Metrics reported while training in debug mode.


/// Zero-one loss for labels in `{-1, +1}`.
pub fn zero_one_loss(true_label: f64, prediction: f64) -> f64 {
    let prediction = if prediction > 0.0 { 1.0 } else { -1.0 };
    if true_label * prediction > 0.0 { 0.0 } else { 1.0 }
}


/// Area under the ROC curve of `scores` for the binary `labels`.
/// Labels greater than `0` are positives.
/// Tied scores receive their average rank.
/// Returns `None` if either class is absent
/// or the slices differ in length.
pub fn roc_auc(labels: &[f64], scores: &[f64]) -> Option<f64> {
    if labels.len() != scores.len() {
        return None;
    }

    let n_positive = labels.iter().filter(|&&y| y > 0.0).count();
    let n_negative = labels.len() - n_positive;
    if n_positive == 0 || n_negative == 0 {
        return None;
    }

    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut rank_sum = 0.0_f64;
    let mut start = 0_usize;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // Ranks are 1-based: the tie group covers ranks start+1 ..= end.
        let rank = (start + 1 + end) as f64 / 2.0;
        let positives = order[start..end].iter()
            .filter(|&&i| labels[i] > 0.0)
            .count();
        rank_sum += rank * positives as f64;
        start = end;
    }

    let p = n_positive as f64;
    let n = n_negative as f64;
    Some((rank_sum - p * (p + 1.0) / 2.0) / (p * n))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_ranking_has_unit_auc() {
        let labels = [-1.0, -1.0, 1.0, 1.0];
        let scores = [0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_auc(&labels, &scores), Some(1.0));
    }


    #[test]
    fn ties_count_half() {
        let labels = [-1.0, 1.0];
        let scores = [0.5, 0.5];
        assert_eq!(roc_auc(&labels, &scores), Some(0.5));
    }


    #[test]
    fn single_class_has_no_auc() {
        assert_eq!(roc_auc(&[1.0, 1.0], &[0.1, 0.2]), None);
    }


    #[test]
    fn length_mismatch_has_no_auc() {
        assert_eq!(roc_auc(&[1.0, -1.0], &[0.1]), None);
    }


    #[test]
    fn zero_one_loss_counts_sign_errors() {
        assert_eq!(zero_one_loss(1.0, 0.3), 0.0);
        assert_eq!(zero_one_loss(-1.0, 0.3), 1.0);
    }
}
