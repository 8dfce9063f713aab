/*
 * @Description  : 张量。对`ndarray`动态维数组的一层薄封装，元素精度由`FloatElement`决定（f32或f64）
 */

use ndarray::{Array, IxDyn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::TensorError;
use crate::utils::traits::float::FloatElement;

mod index;
mod ops {
    pub mod add;
    pub mod mat_mul;
    pub mod mul;
    pub mod others;
    pub mod sub;
}
mod property;
mod shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为f32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor<T = f32> {
    data: Array<T, IxDyn>,
}

impl<T: FloatElement> Tensor<T> {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[n,t,d,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则panic。
    pub fn new(data: &[T], shape: &[usize]) -> Self {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap_or_else(|_| {
            panic!(
                "{}",
                TensorError::DataLengthMismatch {
                    data_len: data.len(),
                    shape: shape.to_vec(),
                }
            )
        });
        Self { data }
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个与`other`形状相同的全零张量
    pub fn zeros_like(other: &Self) -> Self {
        Self::zeros(other.shape())
    }

    /// 创建一个服从正态分布的随机张量（Box-Muller变换）。
    /// 随机源由调用方给出，便于用固定种子复现参数初始化。
    pub fn normal<R: Rng + ?Sized>(mean: T, std_dev: T, shape: &[usize], rng: &mut R) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            // 区间取(0, 1)，避免ln(0)
            let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
            let u2: f64 = rng.gen_range(0.0..1.0);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f64::consts::PI * u2;
            data.push(mean + std_dev * T::from_f64_lossy(r * theta.cos()));
            if data.len() < data_len {
                data.push(mean + std_dev * T::from_f64_lossy(r * theta.sin()));
            }
        }

        Self::new(&data, shape)
    }

    pub(crate) fn from_array(data: Array<T, IxDyn>) -> Self {
        Self { data }
    }
}
