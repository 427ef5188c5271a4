extern crate bvr_classify;

use std::time::Duration;
use image::{Rgba, RgbaImage};
use bvr_classify::classification_runners::InferenceProcess;
use bvr_classify::common::{BvrImage, ClassifierSession, LabelSet};
use bvr_classify::data::TensorBuffer;
use bvr_classify::{spawn_classifier, ClassifyError};

/// Scores each class by how much of its colour channel the image holds.
#[derive(Debug)]
struct ChannelModel {
    labels: LabelSet,
    calls: usize,
}

impl ChannelModel {
    fn new() -> Self {
        Self {
            labels: LabelSet::new(&["red", "green", "blue"]),
            calls: 0,
        }
    }
}

impl InferenceProcess for ChannelModel {
    fn input_size(&self) -> (u32, u32) {
        (4, 4)
    }

    fn labels(&self) -> &LabelSet {
        &self.labels
    }

    fn inference(&mut self, x: TensorBuffer) -> anyhow::Result<Vec<f32>> {
        self.calls += 1;
        assert_eq!(x.shape(), [1, 4, 4, 3]);

        let values = x.to_f32s();
        let mut sums = vec![0.0f32; 3];
        for px in values.chunks_exact(3) {
            for (s, v) in sums.iter_mut().zip(px) {
                *s += v;
            }
        }
        let n = (values.len() / 3) as f32;
        Ok(sums.into_iter().map(|s| s / n).collect())
    }
}

fn solid(r: u8, g: u8, b: u8) -> RgbaImage {
    RgbaImage::from_pixel(9, 5, Rgba([r, g, b, 255]))
}

#[test]
fn predict_requires_selection() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut session = ClassifierSession::new(ChannelModel::new());
    let err = session.predict().unwrap_err();
    let err = err.downcast_ref::<ClassifyError>().unwrap();

    assert_eq!(err, &ClassifyError::NoImageSelected);
    assert_eq!(err.user_message(), "Please select an image first.");
    assert_eq!(session.model().calls, 0);
}

#[test]
fn predict_selected_image() {
    let mut session = ClassifierSession::new(ChannelModel::new()).with_profile(true);

    session.select_image(solid(10, 240, 30));
    let p = session.predict().unwrap();
    assert_eq!(p.label, "green");
    assert!(p.confidence > 0.9);

    session.select_image(BvrImage::from(solid(0, 0, 255)));
    assert_eq!(session.predict().unwrap().label, "blue");

    session.clear();
    assert!(session.selected_image().is_none());
    assert!(session.predict().is_err());
    assert_eq!(session.model().calls, 2);
}

#[test]
fn worker_answers_in_order() {
    let (state, handle) = spawn_classifier(ChannelModel::new(), false).unwrap();

    for (r, g, b) in [(255, 0, 0), (0, 0, 200), (1, 40, 0)] {
        state.img_tx.send(Box::new(BvrImage::from(solid(r, g, b)))).unwrap();
    }
    let labels: Vec<String> = (0..3)
        .map(|_| state.pred_rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap().label)
        .collect();
    assert_eq!(labels, vec!["red", "blue", "green"]);

    drop(state);
    handle.join().unwrap();
}

#[test]
fn worker_reports_errors() {
    let (state, handle) = spawn_classifier(ChannelModel::new(), false).unwrap();

    state.img_tx.send(Box::new(BvrImage::default())).unwrap();
    let err = state.pred_rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ClassifyError>(),
        Some(ClassifyError::InvalidImageDimensions { .. })
    ));

    drop(state);
    handle.join().unwrap();
}
