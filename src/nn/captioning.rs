/*
 * @Description  : 图像描述循环网络（CaptioningRnn）
 *
 * 训练（`loss`，teacher forcing）数据流：
 * ```text
 * features [N, D] ──仿射──→ h0 [N, H]
 * captions_in [N, T] ──词嵌入──→ x [N, T, W]
 * (x, h0) ──RNN──→ h [N, T, H] ──时序仿射──→ scores [N, T, V]
 * (scores, captions_out, mask) ──时序softmax──→ loss
 * ```
 * 反向传播严格按相反顺序，每个前向调用对应一次消费其缓存的反向调用。
 *
 * 推理（`sample`）为贪心自回归解码：每一步取分数最高的词作为下一步的输入。
 */

use log::{debug, warn};
use ndarray::{Array2, s};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::layer::{
    RnnCache, affine_forward, check_dimension, check_shape, rnn_backward, rnn_forward,
    rnn_step_forward, temporal_affine_backward, temporal_affine_forward, word_embedding_backward,
    word_embedding_forward,
};
use super::loss::temporal_softmax_loss;
use super::vocab::{END_TOKEN, START_TOKEN};
use super::{CaptioningConfig, CaptioningParams, CellType, Vocabulary};
use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// `sample`的默认最大长度
pub const DEFAULT_MAX_LENGTH: usize = 30;

/// 图像描述循环网络。
///
/// 批大小 N，图像特征维度 D，词向量维度 W，隐藏维度 H，词表大小 V，序列长度 T。
/// 不使用任何正则化。
///
/// # 使用示例
/// ```ignore
/// let vocab = Vocabulary::from_words(["<NULL>", "<START>", "<END>", "dog"])?;
/// let config = CaptioningConfig { input_dim: 4, wordvec_dim: 4, hidden_dim: 4, ..Default::default() };
/// let mut model = CaptioningRnn::<f32>::new(vocab, &config)?;
///
/// let (loss, grads) = model.loss(&features, &captions)?;
/// model.params_mut().sgd_step(&grads, 5e-3)?;
///
/// let sampled = model.sample(&features, DEFAULT_MAX_LENGTH)?;
/// ```
#[derive(Debug, Clone)]
pub struct CaptioningRnn<T: FloatElement = f32> {
    cell_type: CellType,
    vocab: Vocabulary,
    params: CaptioningParams<T>,
    input_dim: usize,
    wordvec_dim: usize,
    hidden_dim: usize,
}

impl<T: FloatElement> CaptioningRnn<T> {
    /// 创建模型并随机初始化参数。
    /// 配置不合法（如cell_type为"gru"）时在分配任何参数之前就返回错误
    pub fn new(vocab: Vocabulary, config: &CaptioningConfig) -> Result<Self, CaptionError> {
        let cell_type = config.validate()?;

        if vocab.start().is_none() {
            warn!("词表中没有{START_TOKEN}，该模型无法采样");
        }
        if vocab.end().is_none() {
            warn!("词表中没有{END_TOKEN}，生成的句子不会有结束标记");
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let params = CaptioningParams::init(
            vocab.len(),
            config.input_dim,
            config.wordvec_dim,
            config.hidden_dim,
            cell_type.gate_multiplier(),
            &mut rng,
        );
        debug!(
            "创建CaptioningRnn：cell_type={cell_type}，V={}，D={}，W={}，H={}",
            vocab.len(),
            config.input_dim,
            config.wordvec_dim,
            config.hidden_dim
        );

        Ok(Self {
            cell_type,
            vocab,
            params,
            input_dim: config.input_dim,
            wordvec_dim: config.wordvec_dim,
            hidden_dim: config.hidden_dim,
        })
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn params(&self) -> &CaptioningParams<T> {
        &self.params
    }

    /// 供外部优化器原地更新参数
    pub fn params_mut(&mut self) -> &mut CaptioningParams<T> {
        &mut self.params
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn wordvec_dim(&self) -> usize {
        self.wordvec_dim
    }

    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// 计算训练损失及所有参数的梯度。
    ///
    /// # 参数
    /// - `features`: 图像特征 [N, D]
    /// - `captions`: 真实描述 [N, T]，每个元素在 [0, V) 内，T ≥ 2
    ///
    /// # 返回
    /// (标量损失, 与参数同结构同形状的梯度)
    pub fn loss(
        &self,
        features: &Tensor<T>,
        captions: &Array2<usize>,
    ) -> Result<(T, CaptioningParams<T>), CaptionError> {
        let (n, t) = captions.dim();
        if n == 0 {
            return Err(CaptionError::shape_mismatch(
                &[1, t],
                captions.shape(),
                "批大小N须大于0",
            ));
        }
        if n != features.shape()[0] || t < 2 {
            return Err(CaptionError::shape_mismatch(
                &[features.shape()[0], t.max(2)],
                captions.shape(),
                "描述须为 [N, T]，N与特征批大小一致且T至少为2",
            ));
        }
        let h0 = self.project_features(features)?;

        // captions_in 去掉最后一个词作为输入，captions_out 去掉第一个词作为目标：
        // 网络看到第 t 个词后应预测第 t+1 个词
        let captions_in = captions.slice(s![.., ..t - 1]).to_owned();
        let captions_out = captions.slice(s![.., 1..]).to_owned();
        let null = self.vocab.null();
        let mask = captions_out.mapv(|word| word != null);

        let p = &self.params;

        // 前向传播
        let (x, embedding_cache) = word_embedding_forward(&captions_in, &p.w_embed)?;
        let (h, recurrent_cache) = self.recurrent_forward(&x, &h0)?;
        let (scores, scores_cache) = temporal_affine_forward(&h, &p.w_vocab, &p.b_vocab)?;
        let (loss, dscores) = temporal_softmax_loss(&scores, &captions_out, &mask)?;

        // 反向传播
        let vocab_grads = temporal_affine_backward(&dscores, &scores_cache)?;
        let recurrent_grads = rnn_backward(&vocab_grads.dx, &recurrent_cache)?;
        let dw_embed = word_embedding_backward(&recurrent_grads.dx, &embedding_cache)?;
        // h0 直接喂给循环层而非损失头，这里单独计算投影层的梯度
        let dh0 = &recurrent_grads.dh0;
        let dw_proj = features.transpose().mat_mul(dh0);
        let db_proj = dh0.sum_axis(0);

        debug!("loss：N={n}，T={t}，loss={loss}");
        Ok((
            loss,
            CaptioningParams {
                w_embed: dw_embed,
                w_proj: dw_proj,
                b_proj: db_proj,
                wx: recurrent_grads.dwx,
                wh: recurrent_grads.dwh,
                b: recurrent_grads.db,
                w_vocab: vocab_grads.dw,
                b_vocab: vocab_grads.db,
            },
        ))
    }

    /// 贪心解码，为每张图像生成长度恰为`max_length`的描述 [N, max_length]。
    ///
    /// 以`<START>`为第一个输入（输出中不含`<START>`），每步取分数最高的词作为输出和下一步的输入。
    /// 不会因为生成了`<END>`而提前停止：每行都跑满`max_length`步，
    /// `<END>`之后的位置仍是模型生成的词而不是`<NULL>`。需要提前停止见`sample_until_end`
    pub fn sample(
        &self,
        features: &Tensor<T>,
        max_length: usize,
    ) -> Result<Array2<usize>, CaptionError> {
        self.greedy_decode(features, max_length, false)
    }

    /// `sample`的可选扩展：某一行生成`<END>`后，该行其余位置填`<NULL>`；
    /// 所有行都结束后提前退出。词表中没有`<END>`时与`sample`完全相同
    pub fn sample_until_end(
        &self,
        features: &Tensor<T>,
        max_length: usize,
    ) -> Result<Array2<usize>, CaptionError> {
        if self.vocab.end().is_none() {
            warn!("词表中没有{END_TOKEN}，sample_until_end 退化为 sample");
        }
        self.greedy_decode(features, max_length, true)
    }

    fn greedy_decode(
        &self,
        features: &Tensor<T>,
        max_length: usize,
        stop_at_end: bool,
    ) -> Result<Array2<usize>, CaptionError> {
        self.ensure_implemented()?;
        let start = self
            .vocab
            .start()
            .ok_or_else(|| CaptionError::MissingToken(START_TOKEN.to_string()))?;
        let end = if stop_at_end { self.vocab.end() } else { None };

        let p = &self.params;
        let mut prev_h = self.project_features(features)?;
        let n = features.shape()[0];
        let null = self.vocab.null();
        let mut captions = Array2::from_elem((n, max_length), null);
        let mut current = Array2::from_elem((n, 1), start);
        let mut finished = vec![false; n];

        for t in 0..max_length {
            let (embedded, _) = word_embedding_forward(&current, &p.w_embed)?;
            let (next_h, _) =
                rnn_step_forward(&embedded.select_axis(1, 0), &prev_h, &p.wx, &p.wh, &p.b)?;
            let (scores, _) = temporal_affine_forward(
                &next_h.reshape(&[n, 1, self.hidden_dim]),
                &p.w_vocab,
                &p.b_vocab,
            )?;

            for (i, word) in scores.argmax_last().into_iter().enumerate() {
                current[[i, 0]] = word;
                if !finished[i] {
                    captions[[i, t]] = word;
                    finished[i] = Some(word) == end;
                }
            }
            prev_h = next_h;

            if end.is_some() && finished.iter().all(|&done| done) {
                break;
            }
        }

        debug!("sample：N={n}，max_length={max_length}");
        Ok(captions)
    }

    /// 图像特征到初始隐藏状态的仿射投影：h0 = features · W_proj + b_proj。
    /// 先校验全部参数的形状：参数可能经`params_mut()`或`CaptioningParams::load`从外部替换
    fn project_features(&self, features: &Tensor<T>) -> Result<Tensor<T>, CaptionError> {
        self.check_params()?;
        check_dimension(features, 2, "图像特征须为 [N, D]")?;
        check_shape(
            features,
            &[features.shape()[0], self.input_dim],
            "图像特征维度须等于 input_dim",
        )?;
        let (h0, _) = affine_forward(features, &self.params.w_proj, &self.params.b_proj)?;
        Ok(h0)
    }

    /// 各参数的形状须与模型的维度 (V, D, W, H) 及循环单元类型一致
    fn check_params(&self) -> Result<(), CaptionError> {
        let (v, d, w, h) = (
            self.vocab.len(),
            self.input_dim,
            self.wordvec_dim,
            self.hidden_dim,
        );
        let gates = self.cell_type.gate_multiplier() * h;
        let expected: [&[usize]; 8] = [
            &[v, w],
            &[d, h],
            &[h],
            &[w, gates],
            &[h, gates],
            &[gates],
            &[h, v],
            &[v],
        ];
        for ((name, param), shape) in self.params.iter().zip(expected) {
            check_shape(param, shape, &format!("参数{name}的形状与模型维度不一致"))?;
        }
        Ok(())
    }

    /// 按循环单元类型做序列前向；未实现的类型在此处报错而不是退化为其它类型
    fn recurrent_forward(
        &self,
        x: &Tensor<T>,
        h0: &Tensor<T>,
    ) -> Result<(Tensor<T>, RnnCache<T>), CaptionError> {
        match self.cell_type {
            CellType::Rnn => rnn_forward(x, h0, &self.params.wx, &self.params.wh, &self.params.b),
            CellType::Lstm => Err(CaptionError::NotImplemented(self.cell_type)),
        }
    }

    fn ensure_implemented(&self) -> Result<(), CaptionError> {
        match self.cell_type {
            CellType::Rnn => Ok(()),
            CellType::Lstm => Err(CaptionError::NotImplemented(self.cell_type)),
        }
    }
}
