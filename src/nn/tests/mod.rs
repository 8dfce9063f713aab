mod cell_type;
mod layer_affine;
mod layer_temporal_affine;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::tensor::Tensor;

/// 在[start, end]上等距取`shape`所需个数的点，按行优先填入（两端都包含）
pub(super) fn linspace(start: f64, end: f64, shape: &[usize]) -> Tensor<f64> {
    let count = shape.iter().product::<usize>();
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    let data = (0..count).map(|i| start + step * i as f64).collect::<Vec<_>>();
    Tensor::new(&data, shape)
}

/// 固定种子的标准正态张量
pub(super) fn randn(shape: &[usize], seed: u64) -> Tensor<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Tensor::normal(0.0, 1.0, shape, &mut rng)
}
