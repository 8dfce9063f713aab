use super::Tensor;
use crate::errors::TensorError;
use crate::utils::traits::float::FloatElement;
use ndarray::Axis;

impl<T: FloatElement> Tensor<T> {
    /// 按逻辑（行优先）顺序重排为新形状，元素总数必须一致，否则panic
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let new_total_elements: usize = shape.iter().product();
        assert!(
            self.size() == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        Self::new(&self.to_vec(), shape)
    }

    /// 矩阵的转置。只接受2阶张量
    pub fn transpose(&self) -> Self {
        self.assert_dimension(2);
        Self::from_array(self.data.t().to_owned())
    }

    /// 取出`axis`维上第`index`个切片（该维被去掉），如从[N,T,H]中取第t个时间步得到[N,H]
    pub fn select_axis(&self, axis: usize, index: usize) -> Self {
        assert!(
            axis < self.dimension(),
            "{}",
            TensorError::AxisOutOfRange {
                axis,
                dimension: self.dimension(),
            }
        );
        Self::from_array(self.data.index_axis(Axis(axis), index).to_owned())
    }

    /// 将多个形状相同的张量沿新增的`axis`维堆叠，如T个[N,H]沿axis=1堆叠为[N,T,H]
    pub fn stack_axis(tensors: &[Self], axis: usize) -> Self {
        assert!(!tensors.is_empty(), "{}", TensorError::EmptyList);
        let views = tensors.iter().map(|t| t.data.view()).collect::<Vec<_>>();
        let data = ndarray::stack(Axis(axis), &views)
            .unwrap_or_else(|_| panic!("{}", TensorError::IncompatibleShape));
        Self::from_array(data)
    }

    pub(crate) fn assert_dimension(&self, expected: usize) {
        assert!(
            self.dimension() == expected,
            "{}",
            TensorError::DimensionMismatch {
                expected,
                shape: self.shape().to_vec(),
            }
        );
    }
}
