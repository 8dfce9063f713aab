/*
 * @Description  : 词表：词与 [0, V) 内整数索引之间的双射
 */

use std::collections::HashMap;

use ndarray::Array2;

use crate::errors::CaptionError;

pub const NULL_TOKEN: &str = "<NULL>";
pub const START_TOKEN: &str = "<START>";
pub const END_TOKEN: &str = "<END>";

/// 词表。必须包含`<NULL>`（填充）；训练和采样还需要`<START>`，
/// 缺少`<END>`只会影响解码效果，不会出错
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    word_to_idx: HashMap<String, usize>,
    idx_to_word: Vec<String>,
    null: usize,
    start: Option<usize>,
    end: Option<usize>,
}

impl Vocabulary {
    /// 由“词→索引”映射创建词表。索引必须恰好覆盖 [0, V) 且互不重复
    pub fn new(word_to_idx: HashMap<String, usize>) -> Result<Self, CaptionError> {
        let vocab_size = word_to_idx.len();
        let mut slots: Vec<Option<String>> = vec![None; vocab_size];
        for (word, &index) in &word_to_idx {
            let slot = slots.get_mut(index).ok_or(CaptionError::IndexOutOfRange {
                index,
                bound: vocab_size,
            })?;
            if let Some(existing) = slot {
                return Err(CaptionError::InvalidVocabulary(format!(
                    "\"{existing}\"与\"{word}\"共用了索引{index}"
                )));
            }
            *slot = Some(word.clone());
        }
        // 索引互不重复且都小于 V，因此每个位置都已填上
        let idx_to_word = slots.into_iter().flatten().collect::<Vec<_>>();

        let null = *word_to_idx
            .get(NULL_TOKEN)
            .ok_or_else(|| CaptionError::MissingToken(NULL_TOKEN.to_string()))?;
        let start = word_to_idx.get(START_TOKEN).copied();
        let end = word_to_idx.get(END_TOKEN).copied();

        Ok(Self {
            word_to_idx,
            idx_to_word,
            null,
            start,
            end,
        })
    }

    /// 按给定顺序为词编号（第i个词的索引为i）
    pub fn from_words<I, S>(words: I) -> Result<Self, CaptionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut word_to_idx = HashMap::new();
        for (index, word) in words.into_iter().enumerate() {
            let word = word.into();
            if word_to_idx.insert(word.clone(), index).is_some() {
                return Err(CaptionError::InvalidVocabulary(format!("重复的词\"{word}\"")));
            }
        }
        Self::new(word_to_idx)
    }

    /// 词表大小 V
    pub fn len(&self) -> usize {
        self.idx_to_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idx_to_word.is_empty()
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.word_to_idx.get(word).copied()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.idx_to_word.get(index).map(String::as_str)
    }

    pub fn null(&self) -> usize {
        self.null
    }

    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// 将索引矩阵 [N, T] 解码为N个句子：跳过`<NULL>`，遇到`<END>`（含）后停止，词之间以空格分隔
    pub fn decode(&self, captions: &Array2<usize>) -> Vec<String> {
        captions
            .rows()
            .into_iter()
            .map(|row| {
                let mut words = Vec::new();
                for &index in row {
                    if index != self.null {
                        words.push(self.word(index).unwrap_or("<UNK>"));
                    }
                    if Some(index) == self.end {
                        break;
                    }
                }
                words.join(" ")
            })
            .collect()
    }
}
