use ndarray::{LinalgScalar, ScalarOperand};
use num_traits::Float;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};

/// 张量元素（即数值精度）所需满足的约束。
/// 本库只支持两种精度：`f32`（训练用）和`f64`（数值梯度检验用），
/// 模型的所有参数与中间结果都统一使用同一种精度。
pub trait FloatElement:
    Float
    + LinalgScalar
    + ScalarOperand
    + Debug
    + Display
    + Default
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// 从`f64`转换（f32时会有精度损失）
    fn from_f64_lossy(value: f64) -> Self;

    /// 转换为`f64`
    fn to_f64_lossless(self) -> f64;

    /// 从计数值（如批大小`N`）转换
    fn from_count(value: usize) -> Self {
        Self::from_f64_lossy(value as f64)
    }
}

impl FloatElement for f32 {
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    fn to_f64_lossless(self) -> f64 {
        self as f64
    }
}

impl FloatElement for f64 {
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    fn to_f64_lossless(self) -> f64 {
        self
    }
}
