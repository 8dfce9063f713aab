use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;
use ndarray::Axis;

impl<T: FloatElement> Tensor<T> {
    /// 对张量中的所有元素求和并返回纯数
    pub fn sum(&self) -> T {
        self.data.sum()
    }

    /// 沿`axis`维求和（该维被去掉），如对形状[N,H]沿axis=0求和得到[H]
    pub fn sum_axis(&self, axis: usize) -> Self {
        assert!(axis < self.dimension(), "维度超出范围");
        Self::from_array(self.data.sum_axis(Axis(axis)))
    }

    /// 逐元素映射
    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Self {
        Self::from_array(self.data.mapv(f))
    }

    /// 逐元素tanh
    pub fn tanh(&self) -> Self {
        self.map(|x| x.tanh())
    }

    /// 沿最后一维取最大值的索引（并列时取最前者），结果按前面各维展平。
    /// 如形状[N,V]的分数矩阵得到长度为N的索引列表
    pub fn argmax_last(&self) -> Vec<usize> {
        let last_axis = Axis(self.dimension().saturating_sub(1));
        self.data
            .lanes(last_axis)
            .into_iter()
            .map(|lane| {
                lane.iter()
                    .enumerate()
                    .fold((0, T::neg_infinity()), |(best_idx, best_val), (idx, &val)| {
                        if val > best_val {
                            (idx, val)
                        } else {
                            (best_idx, best_val)
                        }
                    })
                    .0
            })
            .collect()
    }

    /// 判断能否与`other`按 NumPy 规则广播
    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        self.shape()
            .iter()
            .rev()
            .zip(other.shape().iter().rev())
            .all(|(&a, &b)| a == b || a == 1 || b == 1)
    }
}
