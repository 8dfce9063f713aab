/*
 * @Description  : 有限差分（中心差分）数值梯度，用于检验各层反向传播给出的解析梯度
 *
 * 数值梯度只在f64下才足够精确，f32下相对误差会被舍入误差淹没。
 */

use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 对“张量→张量”的函数`f`求`x`处的数值梯度，上游梯度为`upstream`（形状与`f(x)`相同）：
/// `grad[i] = Σ((f(x + h·e_i) - f(x - h·e_i)) * upstream) / 2h`
pub fn numeric_gradient<T, F>(mut f: F, x: &Tensor<T>, upstream: &Tensor<T>, h: T) -> Tensor<T>
where
    T: FloatElement,
    F: FnMut(&Tensor<T>) -> Tensor<T>,
{
    numeric_gradient_scalar(|candidate| (f(candidate) * upstream).sum(), x, h)
}

/// 对“张量→纯数”的函数`f`（如损失函数）求`x`处的数值梯度
pub fn numeric_gradient_scalar<T, F>(mut f: F, x: &Tensor<T>, h: T) -> Tensor<T>
where
    T: FloatElement,
    F: FnMut(&Tensor<T>) -> T,
{
    let mut grad = Tensor::zeros_like(x);
    let mut candidate = x.clone();
    for i in 0..x.size() {
        let origin = flat_get(&candidate, i);

        flat_set(&mut candidate, i, origin + h);
        let pos = f(&candidate);
        flat_set(&mut candidate, i, origin - h);
        let neg = f(&candidate);
        flat_set(&mut candidate, i, origin);

        flat_set(&mut grad, i, (pos - neg) / (h + h));
    }
    grad
}

/// 两个同形状张量的最大相对误差：`max(|x - y| / max(1e-8, |x| + |y|))`
pub fn rel_error<T: FloatElement>(x: &Tensor<T>, y: &Tensor<T>) -> f64 {
    assert!(
        x.is_same_shape(y),
        "形状不一致，无法比较：{:?} vs {:?}",
        x.shape(),
        y.shape()
    );
    x.view()
        .iter()
        .zip(y.view().iter())
        .map(|(&a, &b)| {
            let (a, b) = (a.to_f64_lossless(), b.to_f64_lossless());
            (a - b).abs() / (a.abs() + b.abs()).max(1e-8)
        })
        .fold(0.0, f64::max)
}

fn flat_get<T: FloatElement>(tensor: &Tensor<T>, i: usize) -> T {
    tensor.view().iter().nth(i).copied().unwrap_or_else(T::zero)
}

fn flat_set<T: FloatElement>(tensor: &mut Tensor<T>, i: usize, value: T) {
    if let Some(slot) = tensor.view_mut().iter_mut().nth(i) {
        *slot = value;
    }
}
