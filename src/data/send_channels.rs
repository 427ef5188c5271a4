use crate::common::{BvrImage, BvrPrediction};

/// Worker side of a classifier thread.
#[derive(Debug)]
pub struct ClassificationState {
    pub img_rx: crossbeam_channel::Receiver<Box<BvrImage>>,
    pub pred_tx: crossbeam_channel::Sender<anyhow::Result<BvrPrediction>>,
}

/// Caller side of a classifier thread.
#[derive(Debug)]
pub struct SendState {
    pub img_tx: crossbeam_channel::Sender<Box<BvrImage>>,
    pub pred_rx: crossbeam_channel::Receiver<anyhow::Result<BvrPrediction>>,
}

/// Creates both ends of a classifier's request/response channels.
pub fn classification_channels() -> (SendState, ClassificationState) {
    let (img_tx, img_rx) = crossbeam_channel::unbounded();
    let (pred_tx, pred_rx) = crossbeam_channel::unbounded();
    (SendState { img_tx, pred_rx }, ClassificationState { img_rx, pred_tx })
}
