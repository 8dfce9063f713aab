use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::CaptionError;

/// 循环单元类型。只登记了"rnn"与"lstm"两种，其中只有"rnn"已实现；
/// "lstm"可以构造（参数按4倍隐藏维分配），但在前向/采样时会返回`NotImplemented`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellType {
    #[default]
    Rnn,
    Lstm,
}

impl CellType {
    /// 循环权重的列数相对隐藏维的倍数（LSTM有4个门）
    pub fn gate_multiplier(self) -> usize {
        match self {
            Self::Rnn => 1,
            Self::Lstm => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rnn => "rnn",
            Self::Lstm => "lstm",
        }
    }
}

impl FromStr for CellType {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rnn" => Ok(Self::Rnn),
            "lstm" => Ok(Self::Lstm),
            other => Err(CaptionError::InvalidCellType(other.to_string())),
        }
    }
}

impl Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
