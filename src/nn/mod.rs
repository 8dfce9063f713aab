/*
 * @Description  : 负责图像描述循环网络（captioning RNN）的构建：各层的前向/反向、损失以及整体模型
 */

mod captioning;
mod cell_type;
mod config;
pub mod layer;
pub mod loss;
mod params;
mod vocab;

pub use captioning::{CaptioningRnn, DEFAULT_MAX_LENGTH};
pub use cell_type::CellType;
pub use config::CaptioningConfig;
pub use params::{CaptioningParams, PARAM_NAMES};
pub use vocab::{END_TOKEN, NULL_TOKEN, START_TOKEN, Vocabulary};

#[cfg(test)]
mod tests;
