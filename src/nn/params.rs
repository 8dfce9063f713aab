/*
 * @Description  : 模型参数（及与之平行的梯度）
 *
 * 参数以具名字段保存，`iter()`按固定顺序给出所有 (名称, 张量) 对，
 * 使“梯度与参数的键集合、各键形状完全一致”可以在结构上直接检查。
 */

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 所有参数的名称，顺序与`CaptioningParams::iter()`一致
pub const PARAM_NAMES: [&str; 8] = [
    "W_embed", "W_proj", "b_proj", "Wx", "Wh", "b", "W_vocab", "b_vocab",
];

/// 图像描述模型的参数。`loss`返回的梯度也使用同一类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptioningParams<T = f32> {
    /// 词向量表 [V, W]
    pub w_embed: Tensor<T>,
    /// 图像特征→初始隐藏状态的投影 [D, H]
    pub w_proj: Tensor<T>,
    /// [H]
    pub b_proj: Tensor<T>,
    /// 输入→隐藏 [W, H]（LSTM为[W, 4H]）
    pub wx: Tensor<T>,
    /// 隐藏→隐藏 [H, H]（LSTM为[H, 4H]）
    pub wh: Tensor<T>,
    /// [H]（LSTM为[4H]）
    pub b: Tensor<T>,
    /// 隐藏状态→词表分数 [H, V]
    pub w_vocab: Tensor<T>,
    /// [V]
    pub b_vocab: Tensor<T>,
}

impl<T: FloatElement> CaptioningParams<T> {
    /// 随机初始化：词向量 ~ N(0,1)/100，其余权重 ~ N(0,1)/sqrt(fan_in)，偏置全零
    pub fn init<R: Rng + ?Sized>(
        vocab_size: usize,
        input_dim: usize,
        wordvec_dim: usize,
        hidden_dim: usize,
        gate_multiplier: usize,
        rng: &mut R,
    ) -> Self {
        let gates_dim = gate_multiplier * hidden_dim;
        let scaled_normal = |fan_in: usize, cols: usize, rng: &mut R| {
            let std_dev = T::one() / T::from_count(fan_in).sqrt();
            Tensor::normal(T::zero(), std_dev, &[fan_in, cols], rng)
        };

        Self {
            w_embed: Tensor::normal(
                T::zero(),
                T::from_f64_lossy(0.01),
                &[vocab_size, wordvec_dim],
                &mut *rng,
            ),
            w_proj: scaled_normal(input_dim, hidden_dim, &mut *rng),
            b_proj: Tensor::zeros(&[hidden_dim]),
            wx: scaled_normal(wordvec_dim, gates_dim, &mut *rng),
            wh: scaled_normal(hidden_dim, gates_dim, &mut *rng),
            b: Tensor::zeros(&[gates_dim]),
            w_vocab: scaled_normal(hidden_dim, vocab_size, &mut *rng),
            b_vocab: Tensor::zeros(&[vocab_size]),
        }
    }

    /// 按`PARAM_NAMES`的顺序遍历 (名称, 张量)
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Tensor<T>)> {
        [
            &self.w_embed,
            &self.w_proj,
            &self.b_proj,
            &self.wx,
            &self.wh,
            &self.b,
            &self.w_vocab,
            &self.b_vocab,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, tensor)| (PARAM_NAMES[i], tensor))
    }

    /// 按`PARAM_NAMES`的顺序遍历 (名称, 可变张量)
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut Tensor<T>)> {
        [
            &mut self.w_embed,
            &mut self.w_proj,
            &mut self.b_proj,
            &mut self.wx,
            &mut self.wh,
            &mut self.b,
            &mut self.w_vocab,
            &mut self.b_vocab,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, tensor)| (PARAM_NAMES[i], tensor))
    }

    /// 按名称取参数
    pub fn get(&self, name: &str) -> Option<&Tensor<T>> {
        self.iter()
            .find(|(param_name, _)| *param_name == name)
            .map(|(_, tensor)| tensor)
    }

    /// 形状相同的全零参数（即梯度累加的起点）
    pub fn zeros_like(&self) -> Self {
        let mut zeros = self.clone();
        for (_, tensor) in zeros.iter_mut() {
            *tensor = Tensor::zeros_like(tensor);
        }
        zeros
    }

    /// 两组参数是否逐个同形
    pub fn same_layout(&self, other: &Self) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|((_, a), (_, b))| a.is_same_shape(b))
    }

    /// 所有参数是否都是有限值
    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, tensor)| tensor.is_finite())
    }

    /// 朴素SGD更新：`param -= lr * grad`。
    /// 任一梯度形状不符时返回错误，此时所有参数都保持不变
    pub fn sgd_step(&mut self, grads: &Self, learning_rate: T) -> Result<(), CaptionError> {
        if let Some(((name, param), (_, grad))) = self
            .iter()
            .zip(grads.iter())
            .find(|((_, param), (_, grad))| !param.is_same_shape(grad))
        {
            return Err(CaptionError::shape_mismatch(
                param.shape(),
                grad.shape(),
                &format!("{name}的梯度须与参数同形"),
            ));
        }

        for ((_, param), (_, grad)) in self.iter_mut().zip(grads.iter()) {
            *param = &*param - &(grad * learning_rate);
        }
        Ok(())
    }

    /// 以 bincode 格式保存到文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CaptionError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// 从 bincode 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CaptionError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
