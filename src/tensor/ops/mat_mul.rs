use crate::errors::TensorError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;
use ndarray::{ArrayView2, Ix2};

impl<T: FloatElement> Tensor<T> {
    /// 实现矩阵乘法。只接受2阶张量，否则会触发panic。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row），否则也会触发panic。
    pub fn mat_mul(&self, other: &Self) -> Self {
        // 检查前一个张量的列数是否等于后一个张量的行数
        let self_data = self.as_matrix();
        let other_data = other.as_matrix();
        assert!(
            self_data.ncols() == other_data.nrows(),
            "{}",
            TensorError::MatMulShape {
                left: self.shape().to_vec(),
                right: other.shape().to_vec(),
            }
        );
        Self::from_array(self_data.dot(&other_data).into_dyn())
    }

    // 将动态维度视图转换为常量维度的矩阵视图
    fn as_matrix(&self) -> ArrayView2<'_, T> {
        self.data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| {
                panic!(
                    "{}",
                    TensorError::DimensionMismatch {
                        expected: 2,
                        shape: self.shape().to_vec(),
                    }
                )
            })
    }
}
