/*
 * @Description  : 时序仿射层：对序列的每个时间步施加同一个仿射变换
 *
 * 把 [N, T, D] 视为 [N·T, D] 调用仿射层，再还原为 [N, T, M]；
 * 因此 W、b 的梯度同时在 N 和 T 两个维度上累加
 */

use super::affine::{AffineCache, AffineGrads, affine_backward, affine_forward};
use super::{check_dimension, check_shape};
use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 时序仿射层前向缓存
#[derive(Debug, Clone)]
pub struct TemporalAffineCache<T: FloatElement> {
    affine: AffineCache<T>,
    batch_size: usize,
    seq_len: usize,
    input_dim: usize,
    output_dim: usize,
}

/// 时序仿射层前向传播：x [N, T, D]，W [D, M]，b [M] → out [N, T, M]
pub fn temporal_affine_forward<T: FloatElement>(
    x: &Tensor<T>,
    w: &Tensor<T>,
    b: &Tensor<T>,
) -> Result<(Tensor<T>, TemporalAffineCache<T>), CaptionError> {
    check_dimension(x, 3, "时序仿射层的输入须为 [N, T, D]")?;
    check_dimension(w, 2, "时序仿射层的权重须为 [D, M]")?;
    let (n, t, d) = (x.shape()[0], x.shape()[1], x.shape()[2]);
    let m = w.shape()[1];

    let (out, affine) = affine_forward(&x.reshape(&[n * t, d]), w, b)?;
    let cache = TemporalAffineCache {
        affine,
        batch_size: n,
        seq_len: t,
        input_dim: d,
        output_dim: m,
    };
    Ok((out.reshape(&[n, t, m]), cache))
}

/// 时序仿射层反向传播，返回的 dx 为 [N, T, D]，dW 为 [D, M]，db 为 [M]
pub fn temporal_affine_backward<T: FloatElement>(
    dout: &Tensor<T>,
    cache: &TemporalAffineCache<T>,
) -> Result<AffineGrads<T>, CaptionError> {
    let (n, t) = (cache.batch_size, cache.seq_len);
    check_shape(dout, &[n, t, cache.output_dim], "时序仿射层的上游梯度须为 [N, T, M]")?;

    let grads = affine_backward(&dout.reshape(&[n * t, cache.output_dim]), &cache.affine)?;
    Ok(AffineGrads {
        dx: grads.dx.reshape(&[n, t, cache.input_dim]),
        ..grads
    })
}
