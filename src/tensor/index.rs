use super::Tensor;
use crate::utils::traits::float::FloatElement;
use std::ops::{Index, IndexMut};

// 引用式索引：`tensor[[n, t, v]]`
impl<T: FloatElement, const N: usize> Index<[usize; N]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self.data[&index[..]]
    }
}

impl<T: FloatElement, const N: usize> IndexMut<[usize; N]> for Tensor<T> {
    fn index_mut(&mut self, index: [usize; N]) -> &mut Self::Output {
        &mut self.data[&index[..]]
    }
}
