/*
 * @Description  : 仿射（全连接）层
 *
 * 公式: out = x · W + b
 * - x: [N, D_in]
 * - W: [D_in, D_out]
 * - b: [D_out]
 * - out: [N, D_out]
 */

use super::{check_dimension, check_shape};
use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 仿射层前向缓存
#[derive(Debug, Clone)]
pub struct AffineCache<T: FloatElement> {
    x: Tensor<T>,
    w: Tensor<T>,
}

/// 仿射层的梯度
#[derive(Debug, Clone)]
pub struct AffineGrads<T: FloatElement> {
    /// [N, D_in]
    pub dx: Tensor<T>,
    /// [D_in, D_out]
    pub dw: Tensor<T>,
    /// [D_out]
    pub db: Tensor<T>,
}

/// 仿射层前向传播
pub fn affine_forward<T: FloatElement>(
    x: &Tensor<T>,
    w: &Tensor<T>,
    b: &Tensor<T>,
) -> Result<(Tensor<T>, AffineCache<T>), CaptionError> {
    check_dimension(w, 2, "affine 的权重须为 [D_in, D_out]")?;
    check_dimension(x, 2, "affine 的输入须为 [N, D_in]")?;
    let (d_in, d_out) = (w.shape()[0], w.shape()[1]);
    check_shape(x, &[x.shape()[0], d_in], "affine 的输入列数须等于权重行数")?;
    check_shape(b, &[d_out], "affine 的偏置长度须等于权重列数")?;

    let out = x.mat_mul(w) + b;
    let cache = AffineCache {
        x: x.clone(),
        w: w.clone(),
    };
    Ok((out, cache))
}

/// 仿射层反向传播
///
/// ```text
/// dx = dout · Wᵀ
/// dW = xᵀ · dout
/// db = Σ_N dout
/// ```
pub fn affine_backward<T: FloatElement>(
    dout: &Tensor<T>,
    cache: &AffineCache<T>,
) -> Result<AffineGrads<T>, CaptionError> {
    let AffineCache { x, w } = cache;
    check_shape(dout, &[x.shape()[0], w.shape()[1]], "affine 的上游梯度须为 [N, D_out]")?;

    Ok(AffineGrads {
        dx: dout.mat_mul(&w.transpose()),
        dw: x.transpose().mat_mul(dout),
        db: dout.sum_axis(0),
    })
}
