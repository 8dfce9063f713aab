//! # 常用接口模块
//!
//! 本模块提供一些常用的操作接口：数值精度约束、数值梯度检验以及单元测试用的宏

pub mod gradient_check;
pub mod macro_for_unit_test;

pub mod traits {
    pub mod float;
}
