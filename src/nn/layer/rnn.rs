/*
 * @Description  : 朴素RNN（vanilla RNN）：单步单元与沿时间展开的序列层
 *
 * 公式: h_t = tanh(x_t · Wx + h_{t-1} · Wh + b)
 * - x_t: [N, D]
 * - h_{t-1}, h_t: [N, H]
 * - Wx: [D, H]
 * - Wh: [H, H]
 * - b: [H]
 *
 * 序列层的反向传播（BPTT）必须严格按 t = T-1 .. 0 的顺序进行：
 * 每一步的隐藏状态梯度依赖于后一步算出的 dh_{t-1}。
 */

use super::{check_dimension, check_shape};
use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

// ==================== 单步 ====================

/// 单个时间步的前向缓存
#[derive(Debug, Clone)]
pub struct RnnStepCache<T: FloatElement> {
    x: Tensor<T>,
    prev_h: Tensor<T>,
    wx: Tensor<T>,
    wh: Tensor<T>,
    next_h: Tensor<T>,
}

/// 单个时间步的梯度
#[derive(Debug, Clone)]
pub struct RnnStepGrads<T: FloatElement> {
    /// [N, D]
    pub dx: Tensor<T>,
    /// [N, H]
    pub dprev_h: Tensor<T>,
    /// [D, H]
    pub dwx: Tensor<T>,
    /// [H, H]
    pub dwh: Tensor<T>,
    /// [H]
    pub db: Tensor<T>,
}

/// 单步前向传播：`next_h = tanh(x · Wx + prev_h · Wh + b)`
pub fn rnn_step_forward<T: FloatElement>(
    x: &Tensor<T>,
    prev_h: &Tensor<T>,
    wx: &Tensor<T>,
    wh: &Tensor<T>,
    b: &Tensor<T>,
) -> Result<(Tensor<T>, RnnStepCache<T>), CaptionError> {
    check_dimension(wx, 2, "Wx 须为 [D, H]")?;
    check_dimension(x, 2, "RNN 单步输入须为 [N, D]")?;
    let (input_dim, hidden_dim) = (wx.shape()[0], wx.shape()[1]);
    let n = x.shape()[0];
    check_shape(x, &[n, input_dim], "RNN 单步输入的特征维须等于 Wx 的行数")?;
    check_shape(prev_h, &[n, hidden_dim], "上一步隐藏状态须为 [N, H]")?;
    check_shape(wh, &[hidden_dim, hidden_dim], "Wh 须为 [H, H]")?;
    check_shape(b, &[hidden_dim], "RNN 偏置须为 [H]")?;

    let next_h = (x.mat_mul(wx) + prev_h.mat_mul(wh) + b).tanh();
    let cache = RnnStepCache {
        x: x.clone(),
        prev_h: prev_h.clone(),
        wx: wx.clone(),
        wh: wh.clone(),
        next_h: next_h.clone(),
    };
    Ok((next_h, cache))
}

/// 单步反向传播
///
/// ```text
/// dz      = dnext_h ⊙ (1 - next_h²)
/// dx      = dz · Wxᵀ
/// dprev_h = dz · Whᵀ
/// dWx     = xᵀ · dz
/// dWh     = prev_hᵀ · dz
/// db      = Σ_N dz
/// ```
pub fn rnn_step_backward<T: FloatElement>(
    dnext_h: &Tensor<T>,
    cache: &RnnStepCache<T>,
) -> Result<RnnStepGrads<T>, CaptionError> {
    check_shape(dnext_h, cache.next_h.shape(), "RNN 单步的上游梯度须与 next_h 同形")?;

    // tanh 的导数: 1 - tanh²
    let dz = dnext_h * &cache.next_h.map(|h| T::one() - h * h);
    Ok(RnnStepGrads {
        dx: dz.mat_mul(&cache.wx.transpose()),
        dprev_h: dz.mat_mul(&cache.wh.transpose()),
        dwx: cache.x.transpose().mat_mul(&dz),
        dwh: cache.prev_h.transpose().mat_mul(&dz),
        db: dz.sum_axis(0),
    })
}

// ==================== 序列 ====================

/// 整个序列的前向缓存：按时间步排列的单步缓存
#[derive(Debug, Clone)]
pub struct RnnCache<T: FloatElement> {
    steps: Vec<RnnStepCache<T>>,
    batch_size: usize,
    input_dim: usize,
    hidden_dim: usize,
}

impl<T: FloatElement> RnnCache<T> {
    /// 时间步数 T
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// 整个序列的梯度
#[derive(Debug, Clone)]
pub struct RnnGrads<T: FloatElement> {
    /// [N, T, D]
    pub dx: Tensor<T>,
    /// [N, H]
    pub dh0: Tensor<T>,
    /// [D, H]
    pub dwx: Tensor<T>,
    /// [H, H]
    pub dwh: Tensor<T>,
    /// [H]
    pub db: Tensor<T>,
}

/// 序列前向传播：从初始隐藏状态`h0`出发，对 t = 0..T-1 依次调用单步单元。
/// 输入`x`为 [N, T, D]，输出所有时间步的隐藏状态 [N, T, H]
pub fn rnn_forward<T: FloatElement>(
    x: &Tensor<T>,
    h0: &Tensor<T>,
    wx: &Tensor<T>,
    wh: &Tensor<T>,
    b: &Tensor<T>,
) -> Result<(Tensor<T>, RnnCache<T>), CaptionError> {
    check_dimension(x, 3, "RNN 序列输入须为 [N, T, D]")?;
    let seq_len = x.shape()[1];
    if seq_len == 0 {
        return Err(CaptionError::shape_mismatch(
            &[x.shape()[0], 1, x.shape()[2]],
            x.shape(),
            "RNN 序列至少需要1个时间步",
        ));
    }

    let mut prev_h = h0.clone();
    let mut hidden_states = Vec::with_capacity(seq_len);
    let mut steps = Vec::with_capacity(seq_len);
    for t in 0..seq_len {
        let (next_h, step_cache) = rnn_step_forward(&x.select_axis(1, t), &prev_h, wx, wh, b)?;
        hidden_states.push(next_h.clone());
        steps.push(step_cache);
        prev_h = next_h;
    }

    let cache = RnnCache {
        steps,
        batch_size: x.shape()[0],
        input_dim: wx.shape()[0],
        hidden_dim: wx.shape()[1],
    };
    Ok((Tensor::stack_axis(&hidden_states, 1), cache))
}

/// 序列反向传播（BPTT）。`dh`为损失对每个时间步输出隐藏状态的梯度 [N, T, H]。
/// 第 t 步收到的隐藏状态梯度 = dh[:, t, :] + 第 t+1 步回传的 dprev_h；
/// 参数梯度在所有时间步上累加，t = 0 时回传的 dprev_h 即为 dh0
pub fn rnn_backward<T: FloatElement>(
    dh: &Tensor<T>,
    cache: &RnnCache<T>,
) -> Result<RnnGrads<T>, CaptionError> {
    let (n, input_dim, hidden_dim) = (cache.batch_size, cache.input_dim, cache.hidden_dim);
    let seq_len = cache.len();
    check_shape(dh, &[n, seq_len, hidden_dim], "RNN 序列的上游梯度须为 [N, T, H]")?;

    let mut dprev_h = Tensor::zeros(&[n, hidden_dim]);
    let mut dwx = Tensor::zeros(&[input_dim, hidden_dim]);
    let mut dwh = Tensor::zeros(&[hidden_dim, hidden_dim]);
    let mut db = Tensor::zeros(&[hidden_dim]);
    let mut dxs = Vec::with_capacity(seq_len);
    for (t, step_cache) in cache.steps.iter().enumerate().rev() {
        let dnext_h = dh.select_axis(1, t) + &dprev_h;
        let grads = rnn_step_backward(&dnext_h, step_cache)?;
        dxs.push(grads.dx);
        dprev_h = grads.dprev_h;
        dwx = dwx + grads.dwx;
        dwh = dwh + grads.dwh;
        db = db + grads.db;
    }
    dxs.reverse();

    Ok(RnnGrads {
        dx: Tensor::stack_axis(&dxs, 1),
        dh0: dprev_h,
        dwx,
        dwh,
        db,
    })
}
