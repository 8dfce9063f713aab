/*
 * @Description  : 张量的减法，规则同加法（支持广播）
 */

use crate::errors::TensorError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;
use std::ops::Sub;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 -（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<T: FloatElement> Sub for Tensor<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        sub_within_tensors(&self, &other)
    }
}

impl<'a, T: FloatElement> Sub<&'a Self> for Tensor<T> {
    type Output = Self;

    fn sub(self, other: &'a Self) -> Self {
        sub_within_tensors(&self, other)
    }
}

impl<T: FloatElement> Sub<Tensor<T>> for &Tensor<T> {
    type Output = Tensor<T>;

    fn sub(self, other: Tensor<T>) -> Tensor<T> {
        sub_within_tensors(self, &other)
    }
}

impl<'b, T: FloatElement> Sub<&'b Tensor<T>> for &Tensor<T> {
    type Output = Tensor<T>;

    fn sub(self, other: &'b Tensor<T>) -> Tensor<T> {
        sub_within_tensors(self, other)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 -（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

fn sub_within_tensors<T: FloatElement>(tensor_1: &Tensor<T>, tensor_2: &Tensor<T>) -> Tensor<T> {
    assert!(
        tensor_1.can_broadcast_with(tensor_2),
        "{}",
        TensorError::IncompatibleShape
    );
    Tensor::from_array(&tensor_1.data - &tensor_2.data)
}
