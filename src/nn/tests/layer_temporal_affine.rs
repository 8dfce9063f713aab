use super::randn;
use crate::assert_err;
use crate::errors::CaptionError;
use crate::nn::layer::{affine_forward, temporal_affine_backward, temporal_affine_forward};
use crate::tensor::Tensor;
use crate::utils::gradient_check::{numeric_gradient, rel_error};
use approx::assert_abs_diff_eq;

/// 每个时间步的输出都应等于对该步单独做仿射的结果
#[test]
fn test_temporal_affine_forward_per_step() {
    let (n, t, d, m) = (2, 3, 4, 5);
    let x = randn(&[n, t, d], 61);
    let w = randn(&[d, m], 62);
    let b = randn(&[m], 63);

    let (out, _) = temporal_affine_forward(&x, &w, &b).unwrap();
    assert_eq!(out.shape(), &[n, t, m]);
    for step in 0..t {
        let (expected, _) = affine_forward(&x.select_axis(1, step), &w, &b).unwrap();
        let actual = out.select_axis(1, step);
        for i in 0..n {
            for k in 0..m {
                assert_abs_diff_eq!(actual[[i, k]], expected[[i, k]], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_temporal_affine_backward_matches_numeric_gradient() {
    let (n, t, d, m) = (2, 3, 4, 5);
    let x = randn(&[n, t, d], 71);
    let w = randn(&[d, m], 72);
    let b = randn(&[m], 73);
    let dout = randn(&[n, t, m], 74);

    let (_, cache) = temporal_affine_forward(&x, &w, &b).unwrap();
    let grads = temporal_affine_backward(&dout, &cache).unwrap();
    assert_eq!(grads.dx.shape(), &[n, t, d]);
    assert_eq!(grads.dw.shape(), &[d, m]);
    assert_eq!(grads.db.shape(), &[m]);

    let forward = |x: &Tensor<f64>, w: &Tensor<f64>, b: &Tensor<f64>| {
        temporal_affine_forward(x, w, b).unwrap().0
    };
    let dx_num = numeric_gradient(|x| forward(x, &w, &b), &x, &dout, 1e-5);
    let dw_num = numeric_gradient(|w| forward(&x, w, &b), &w, &dout, 1e-5);
    let db_num = numeric_gradient(|b| forward(&x, &w, b), &b, &dout, 1e-5);

    assert!(rel_error(&grads.dx, &dx_num) < 1e-6);
    assert!(rel_error(&grads.dw, &dw_num) < 1e-6);
    assert!(rel_error(&grads.db, &db_num) < 1e-6);
}

/// 偏置梯度同时在 N 和 T 上累加
#[test]
fn test_temporal_affine_bias_gradient_sums_over_batch_and_time() {
    let x = Tensor::<f64>::zeros(&[2, 3, 1]);
    let w = Tensor::zeros(&[1, 2]);
    let b = Tensor::zeros(&[2]);
    let mut dout = Tensor::zeros(&[2, 3, 2]);
    for i in 0..2 {
        for j in 0..3 {
            dout[[i, j, 0]] = 1.0;
            dout[[i, j, 1]] = 0.5;
        }
    }

    let (_, cache) = temporal_affine_forward(&x, &w, &b).unwrap();
    let grads = temporal_affine_backward(&dout, &cache).unwrap();
    assert_eq!(grads.db, Tensor::new(&[6.0, 3.0], &[2]));
}

#[test]
fn test_temporal_affine_shape_errors() {
    let w = Tensor::<f64>::zeros(&[4, 5]);
    let b = Tensor::zeros(&[5]);

    let result = temporal_affine_forward(&Tensor::zeros(&[2, 4]), &w, &b);
    assert_err!(result, CaptionError::DimensionMismatch { expected: 3, got: 2, .. });

    let result = temporal_affine_forward(&Tensor::zeros(&[2, 3, 3]), &w, &b);
    assert_err!(
        result,
        CaptionError::ShapeMismatch([6, 4], [6, 3], "affine 的输入列数须等于权重行数")
    );

    let (_, cache) = temporal_affine_forward(&Tensor::zeros(&[2, 3, 4]), &w, &b).unwrap();
    let result = temporal_affine_backward(&Tensor::zeros(&[2, 3, 4]), &cache);
    assert_err!(
        result,
        CaptionError::ShapeMismatch([2, 3, 5], [2, 3, 4], "时序仿射层的上游梯度须为 [N, T, M]")
    );
}
