//! 模型配置
//!
//! 可以直接在代码里构造，也可以从 JSON 读取，未给出的字段取默认值：
//!
//! ```json
//! {
//!   "input_dim": 512,
//!   "wordvec_dim": 256,
//!   "hidden_dim": 512,
//!   "cell_type": "rnn",
//!   "seed": 231
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::CellType;
use crate::errors::CaptionError;

/// 图像描述模型的配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptioningConfig {
    /// 图像特征维度 D
    pub input_dim: usize,
    /// 词向量维度 W
    pub wordvec_dim: usize,
    /// 隐藏状态维度 H
    pub hidden_dim: usize,
    /// 循环单元类型："rnn" 或 "lstm"
    pub cell_type: String,
    /// 参数初始化的随机种子；为`None`时使用系统熵源
    pub seed: Option<u64>,
}

impl Default for CaptioningConfig {
    fn default() -> Self {
        Self {
            input_dim: 512,
            wordvec_dim: 128,
            hidden_dim: 128,
            cell_type: CellType::Rnn.to_string(),
            seed: None,
        }
    }
}

impl CaptioningConfig {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, CaptionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件读取
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CaptionError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// 导出为 JSON 字符串
    pub fn to_json(&self) -> Result<String, CaptionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 校验配置并解析出循环单元类型。任何参数分配之前都必须先通过本校验
    pub fn validate(&self) -> Result<CellType, CaptionError> {
        let cell_type = self.cell_type.parse::<CellType>()?;
        for (name, dim) in [
            ("input_dim", self.input_dim),
            ("wordvec_dim", self.wordvec_dim),
            ("hidden_dim", self.hidden_dim),
        ] {
            if dim == 0 {
                return Err(CaptionError::InvalidConfig(format!("{name}须大于0")));
            }
        }
        Ok(cell_type)
    }
}
