use crate::common::{BvrPrediction, LabelSet};
use crate::error::ClassifyError;

/// Index and value of the highest score. Ties go to the lowest index and NaN
/// never wins, so `None` means the slice is empty or holds only NaN.
pub fn arg_max(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, max)) if score <= max => {}
            _ => best = Some((i, score)),
        }
    }

    best
}

/// Picks the top class and pairs it with its label.
pub fn select_prediction(scores: &[f32], labels: &LabelSet) -> Result<BvrPrediction, ClassifyError> {
    if scores.is_empty() {
        return Err(ClassifyError::EmptyConfidenceVector);
    }
    let (class_id, confidence) = arg_max(scores).ok_or(ClassifyError::NoComparableScore { len: scores.len() })?;
    let label = labels.get(class_id)?;

    Ok(BvrPrediction::new(class_id, label, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_pick_lowest_index() {
        assert_eq!(arg_max(&[0.2, 0.5, 0.5, 0.1]), Some((1, 0.5)));
    }

    #[test]
    fn nan_is_skipped() {
        assert_eq!(arg_max(&[f32::NAN, 0.1, f32::NAN]), Some((1, 0.1)));
        assert_eq!(arg_max(&[f32::NAN]), None);
        assert_eq!(arg_max(&[]), None);
    }

    #[test]
    fn negative_scores() {
        assert_eq!(arg_max(&[-3.0, -1.5, -2.0]), Some((1, -1.5)));
    }

    #[test]
    fn all_negative_infinity_picks_first() {
        assert_eq!(arg_max(&[f32::NEG_INFINITY, f32::NEG_INFINITY]), Some((0, f32::NEG_INFINITY)));

        let labels = LabelSet::new(&["a", "b"]);
        let p = select_prediction(&[f32::NEG_INFINITY, f32::NEG_INFINITY], &labels).unwrap();
        assert_eq!(p.label, "a");
        assert_eq!(p.confidence, f32::NEG_INFINITY);
    }

    #[test]
    fn only_nan_is_not_empty() {
        let labels = LabelSet::new(&["a", "b"]);
        assert_eq!(
            select_prediction(&[f32::NAN, f32::NAN], &labels).unwrap_err(),
            ClassifyError::NoComparableScore { len: 2 }
        );
        assert_eq!(select_prediction(&[], &labels).unwrap_err(), ClassifyError::EmptyConfidenceVector);
    }

    #[test]
    fn single_class() {
        let labels = LabelSet::new(&["Cat"]);
        let p = select_prediction(&[0.9], &labels).unwrap();
        assert_eq!(p.label, "Cat");
        assert_eq!(p.class_id, 0);
        assert_eq!(p.confidence, 0.9);
    }
}
