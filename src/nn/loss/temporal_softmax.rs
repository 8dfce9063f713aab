/*
 * @Description  : 带掩码的时序 Softmax 交叉熵损失
 *
 * 对每个 (n, t) 位置在词表维上做数值稳定的 softmax 交叉熵：
 * ```text
 * log p_y = x_y - max(x) - log(Σ exp(x_j - max(x)))
 * L = -Σ_{mask(n,t)} log p_y / N
 * ```
 * 注意归一化是除以批大小 N，而不是除以未被掩码的位置数；N = 0 时返回错误。
 * 梯度：被掩码（mask=true）位置为 (softmax(x) - onehot(y)) / N，其余位置恒为零。
 */

use ndarray::Array2;

use crate::errors::CaptionError;
use crate::nn::layer::check_dimension;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 计算损失及其对分数`x`的梯度。
///
/// # 参数
/// - `x`: 分数 [N, T, V]
/// - `y`: 目标索引 [N, T]，每个元素在 [0, V) 内
/// - `mask`: [N, T]，为 true 的位置才计入损失
///
/// # 返回
/// (标量损失, dx [N, T, V])
pub fn temporal_softmax_loss<T: FloatElement>(
    x: &Tensor<T>,
    y: &Array2<usize>,
    mask: &Array2<bool>,
) -> Result<(T, Tensor<T>), CaptionError> {
    check_dimension(x, 3, "时序 softmax 的分数须为 [N, T, V]")?;
    let (n, t, v) = (x.shape()[0], x.shape()[1], x.shape()[2]);
    // 损失按 N 归一化，空批次没有定义
    if n == 0 {
        return Err(CaptionError::shape_mismatch(
            &[1, t, v],
            x.shape(),
            "批大小N须大于0",
        ));
    }
    if y.dim() != (n, t) {
        return Err(CaptionError::shape_mismatch(
            &[n, t],
            y.shape(),
            "目标索引须为 [N, T]",
        ));
    }
    if mask.dim() != (n, t) {
        return Err(CaptionError::shape_mismatch(
            &[n, t],
            mask.shape(),
            "掩码须为 [N, T]",
        ));
    }
    if let Some(&index) = y.iter().find(|&&i| i >= v) {
        return Err(CaptionError::IndexOutOfRange { index, bound: v });
    }

    let batch = T::from_count(n);
    let mut loss = T::zero();
    let mut dx = Tensor::zeros(&[n, t, v]);
    for ((i, j), &target) in y.indexed_iter() {
        if !mask[[i, j]] {
            continue;
        }

        // 找到该位置的最大值
        let max_val = (0..v).fold(T::neg_infinity(), |acc, k| acc.max(x[[i, j, k]]));

        // 计算 exp(x - max) 和 sum
        let mut sum_exp = T::zero();
        for k in 0..v {
            let exp_val = (x[[i, j, k]] - max_val).exp();
            dx[[i, j, k]] = exp_val;
            sum_exp = sum_exp + exp_val;
        }

        loss = loss - (x[[i, j, target]] - max_val - sum_exp.ln());

        // 归一化为概率，再减去 one-hot 并除以 N
        for k in 0..v {
            dx[[i, j, k]] = dx[[i, j, k]] / sum_exp / batch;
        }
        dx[[i, j, target]] = dx[[i, j, target]] - T::one() / batch;
    }

    Ok((loss / batch, dx))
}
