use std::thread::JoinHandle;
use crate::classification_runners::InferenceProcess;
use crate::data::send_channels::{classification_channels, ClassificationState, SendState};

/// Serves images from the channel until every sender is gone.
pub fn classifier_loop<P: InferenceProcess>(state: ClassificationState, mut model: P, profile: bool) {
    // MESSAGE LOOP STARTS HERE
    while let Ok(bvr_image) = state.img_rx.recv() {
        let result = model.forward(&bvr_image, profile);
        if let Err(err) = &result {
            log::warn!("bvr_classify: Classification failed: {:#}", err);
        }
        if state.pred_tx.send(result).is_err() {
            log::info!("bvr_classify: Prediction receiver dropped, stopping classifier");
            break;
        }
    }
    log::info!("bvr_classify: Image channel closed, classifier stopped");
}

/// Moves `model` onto its own thread and returns the channels that talk to it.
pub fn spawn_classifier<P>(model: P, profile: bool) -> anyhow::Result<(SendState, JoinHandle<()>)>
where
    P: InferenceProcess + Send + 'static,
{
    let (send_state, state) = classification_channels();
    let handle = std::thread::Builder::new()
        .name("bvr-classifier".to_string())
        .spawn(move || classifier_loop(state, model, profile))?;
    Ok((send_state, handle))
}
