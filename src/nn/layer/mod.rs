/*
 * @Description  : 层（layer）：每个层都是一对纯函数，前向函数返回输出和缓存（cache），
 *                 反向函数只消费该前向调用产生的缓存，给出对各输入/参数的梯度
 */

mod affine;
mod rnn;
mod temporal_affine;
mod word_embedding;

pub use affine::{AffineCache, AffineGrads, affine_backward, affine_forward};
pub use rnn::{
    RnnCache, RnnGrads, RnnStepCache, RnnStepGrads, rnn_backward, rnn_forward, rnn_step_backward,
    rnn_step_forward,
};
pub use temporal_affine::{TemporalAffineCache, temporal_affine_backward, temporal_affine_forward};
pub use word_embedding::{WordEmbeddingCache, word_embedding_backward, word_embedding_forward};

use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 校验张量的阶数
pub(crate) fn check_dimension<T: FloatElement>(
    tensor: &Tensor<T>,
    expected: usize,
    message: &str,
) -> Result<(), CaptionError> {
    if tensor.dimension() != expected {
        return Err(CaptionError::DimensionMismatch {
            expected,
            got: tensor.dimension(),
            message: message.to_string(),
        });
    }
    Ok(())
}

/// 校验张量的形状
pub(crate) fn check_shape<T: FloatElement>(
    tensor: &Tensor<T>,
    expected: &[usize],
    message: &str,
) -> Result<(), CaptionError> {
    if tensor.shape() != expected {
        return Err(CaptionError::shape_mismatch(expected, tensor.shape(), message));
    }
    Ok(())
}
