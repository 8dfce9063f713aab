/*
 * @Description  : 词嵌入层：按整数索引从词向量表中取行
 *
 * - indices: [N, T]，每个元素在 [0, V) 内
 * - W_embed: [V, W]
 * - out: [N, T, W]
 */

use ndarray::Array2;

use super::{check_dimension, check_shape};
use crate::errors::CaptionError;
use crate::tensor::Tensor;
use crate::utils::traits::float::FloatElement;

/// 词嵌入层前向缓存：反向时只需要索引和词表大小
#[derive(Debug, Clone)]
pub struct WordEmbeddingCache {
    indices: Array2<usize>,
    vocab_size: usize,
    wordvec_dim: usize,
}

/// 词嵌入层前向传播（按行取词向量）
pub fn word_embedding_forward<T: FloatElement>(
    indices: &Array2<usize>,
    w_embed: &Tensor<T>,
) -> Result<(Tensor<T>, WordEmbeddingCache), CaptionError> {
    check_dimension(w_embed, 2, "词向量表须为 [V, W]")?;
    let (vocab_size, wordvec_dim) = (w_embed.shape()[0], w_embed.shape()[1]);
    if let Some(&index) = indices.iter().find(|&&i| i >= vocab_size) {
        return Err(CaptionError::IndexOutOfRange {
            index,
            bound: vocab_size,
        });
    }

    let (n, t) = indices.dim();
    let mut out = Tensor::zeros(&[n, t, wordvec_dim]);
    for ((i, j), &word) in indices.indexed_iter() {
        for k in 0..wordvec_dim {
            out[[i, j, k]] = w_embed[[word, k]];
        }
    }

    let cache = WordEmbeddingCache {
        indices: indices.clone(),
        vocab_size,
        wordvec_dim,
    };
    Ok((out, cache))
}

/// 词嵌入层反向传播，返回词向量表的梯度 [V, W]。
/// 同一个词出现多次时，各次的梯度累加（而非覆盖）到同一行
pub fn word_embedding_backward<T: FloatElement>(
    dout: &Tensor<T>,
    cache: &WordEmbeddingCache,
) -> Result<Tensor<T>, CaptionError> {
    let (n, t) = cache.indices.dim();
    check_shape(dout, &[n, t, cache.wordvec_dim], "词嵌入的上游梯度须为 [N, T, W]")?;

    let mut dw = Tensor::zeros(&[cache.vocab_size, cache.wordvec_dim]);
    for ((i, j), &word) in cache.indices.indexed_iter() {
        for k in 0..cache.wordvec_dim {
            dw[[word, k]] = dw[[word, k]] + dout[[i, j, k]];
        }
    }
    Ok(dw)
}
