//! # Caption RNN
//!
//! `caption_rnn`用纯rust实现以图像特征为条件、生成文字描述的循环神经网络：
//! 单层朴素RNN、词嵌入、图像特征到隐藏状态的仿射投影以及时序仿射+softmax输出头，
//! 每一层都给出前向与反向（梯度）计算。数据加载、词表构建与优化器循环不在本库范围内。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
