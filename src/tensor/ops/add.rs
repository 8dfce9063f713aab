/*
 * @Description  : 张量的加法，实现了两个张量“逐元素”相加的运算，并返回一个新的张量。
 *                 两个操作数均为张量时支持 NumPy 风格的广播（broadcasting），
 *                 如形状为[N,H]的张量加上形状为[H]的偏置。
 */

use crate::errors::TensorError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;
use std::ops::Add;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 +（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<T: FloatElement> Add for Tensor<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        add_within_tensors(&self, &other)
    }
}

impl<'a, T: FloatElement> Add<&'a Self> for Tensor<T> {
    type Output = Self;

    fn add(self, other: &'a Self) -> Self {
        add_within_tensors(&self, other)
    }
}

impl<T: FloatElement> Add<Tensor<T>> for &Tensor<T> {
    type Output = Tensor<T>;

    fn add(self, other: Tensor<T>) -> Tensor<T> {
        add_within_tensors(self, &other)
    }
}

impl<'b, T: FloatElement> Add<&'b Tensor<T>> for &Tensor<T> {
    type Output = Tensor<T>;

    fn add(self, other: &'b Tensor<T>) -> Tensor<T> {
        add_within_tensors(self, other)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 +（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/// 两个张量相加，支持 NumPy 风格广播（broadcasting）
///
/// # Panics
/// 如果形状不兼容（无法广播）
fn add_within_tensors<T: FloatElement>(tensor_1: &Tensor<T>, tensor_2: &Tensor<T>) -> Tensor<T> {
    assert!(
        tensor_1.can_broadcast_with(tensor_2),
        "{}",
        TensorError::IncompatibleShape
    );
    Tensor::from_array(&tensor_1.data + &tensor_2.data)
}
