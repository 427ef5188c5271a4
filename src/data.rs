mod config_ort;
mod model_asset;
mod tensor_buffer;
mod time_calc;
pub mod send_channels;

pub use config_ort::ConfigOrt;
pub use model_asset::ModelAsset;
pub use tensor_buffer::{TensorBuffer, TENSOR_CHANNELS};
pub use time_calc::TimeCalc;

pub(crate) const CROSS_MARK: &str = "❌";
