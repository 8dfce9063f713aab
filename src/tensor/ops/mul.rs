/*
 * @Description  : 张量的逐元素乘法（非矩阵乘法，矩阵乘法见`mat_mul`），规则同加法（支持广播）
 */

use crate::errors::TensorError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;
use std::ops::Mul;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓带引用的张量 * 纯数（如学习率）↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<T: FloatElement> Mul<T> for &Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, scalar: T) -> Tensor<T> {
        Tensor::from_array(&self.data * scalar)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑带引用的张量 * 纯数（如学习率）↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 *（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<T: FloatElement> Mul for Tensor<T> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        mul_within_tensors(&self, &other)
    }
}

impl<'a, T: FloatElement> Mul<&'a Self> for Tensor<T> {
    type Output = Self;

    fn mul(self, other: &'a Self) -> Self {
        mul_within_tensors(&self, other)
    }
}

impl<T: FloatElement> Mul<Tensor<T>> for &Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, other: Tensor<T>) -> Tensor<T> {
        mul_within_tensors(self, &other)
    }
}

impl<'b, T: FloatElement> Mul<&'b Tensor<T>> for &Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, other: &'b Tensor<T>) -> Tensor<T> {
        mul_within_tensors(self, other)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 *（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

fn mul_within_tensors<T: FloatElement>(tensor_1: &Tensor<T>, tensor_2: &Tensor<T>) -> Tensor<T> {
    assert!(
        tensor_1.can_broadcast_with(tensor_2),
        "{}",
        TensorError::IncompatibleShape
    );
    Tensor::from_array(&tensor_1.data * &tensor_2.data)
}
