use thiserror::Error;

use crate::nn::CellType;

/// 张量层面的错误信息。
/// 张量运算沿用“调用方错误即panic”的约定，这里的变体只作为panic消息使用。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    #[error("数据长度{data_len}与形状{shape:?}所需的元素个数不一致")]
    DataLengthMismatch { data_len: usize, shape: Vec<usize> },
    #[error("输入的张量维度必须为{expected}，实际形状为{shape:?}")]
    DimensionMismatch { expected: usize, shape: Vec<usize> },
    #[error("前一个张量的列数必须等于后一个张量的行数：{left:?} · {right:?}")]
    MatMulShape { left: Vec<usize>, right: Vec<usize> },
    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("维度{axis}超出范围（张量维数为{dimension}）")]
    AxisOutOfRange { axis: usize, dimension: usize },
}

/// 本库对外的错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptionError {
    /// 构造时传入了未登记的循环单元类型（如"gru"）
    #[error("无效的cell_type \"{0}\"，只支持\"rnn\"或\"lstm\"")]
    InvalidCellType(String),
    /// 已登记但尚未实现的循环单元类型（如"lstm"）在使用时触发
    #[error("{0}尚未实现")]
    NotImplemented(CellType),
    #[error("形状不一致：期望{expected:?}，实际{got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },
    #[error("张量维数不一致：期望{expected}阶，实际{got}阶（{message}）")]
    DimensionMismatch {
        expected: usize,
        got: usize,
        message: String,
    },
    #[error("索引{index}超出范围[0, {bound})")]
    IndexOutOfRange { index: usize, bound: usize },
    #[error("词表中缺少必需的{0}标记")]
    MissingToken(String),
    #[error("无效的词表：{0}")]
    InvalidVocabulary(String),
    #[error("无效的配置：{0}")]
    InvalidConfig(String),
    #[error("读写失败：{0}")]
    Io(String),
    #[error("（反）序列化失败：{0}")]
    Serialization(String),
}

impl CaptionError {
    /// 构造形状不一致错误的便捷方法
    pub(crate) fn shape_mismatch(expected: &[usize], got: &[usize], message: &str) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
            message: message.to_string(),
        }
    }
}

impl From<std::io::Error> for CaptionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CaptionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for CaptionError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
