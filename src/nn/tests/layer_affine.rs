use super::randn;
use crate::assert_err;
use crate::errors::CaptionError;
use crate::nn::layer::{affine_backward, affine_forward};
use crate::tensor::Tensor;
use crate::utils::gradient_check::{numeric_gradient, rel_error};

#[test]
fn test_affine_forward() {
    // [[1, 2],     [[1, 0, -1],
    //  [3, 4]]  ·   [2, 1,  0]]  + [0.5, -0.5, 1]
    let x = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let w = Tensor::new(&[1.0, 0.0, -1.0, 2.0, 1.0, 0.0], &[2, 3]);
    let b = Tensor::new(&[0.5, -0.5, 1.0], &[3]);

    let (out, _) = affine_forward(&x, &w, &b).unwrap();
    assert_eq!(
        out,
        Tensor::new(&[5.5, 1.5, 0.0, 11.5, 3.5, -2.0], &[2, 3])
    );
}

#[test]
fn test_affine_backward_matches_numeric_gradient() {
    let x = randn(&[4, 5], 1);
    let w = randn(&[5, 3], 2);
    let b = randn(&[3], 3);
    let dout = randn(&[4, 3], 4);

    let (_, cache) = affine_forward(&x, &w, &b).unwrap();
    let grads = affine_backward(&dout, &cache).unwrap();

    let dx_num = numeric_gradient(|x| affine_forward(x, &w, &b).unwrap().0, &x, &dout, 1e-5);
    let dw_num = numeric_gradient(|w| affine_forward(&x, w, &b).unwrap().0, &w, &dout, 1e-5);
    let db_num = numeric_gradient(|b| affine_forward(&x, &w, b).unwrap().0, &b, &dout, 1e-5);

    assert!(rel_error(&grads.dx, &dx_num) < 1e-6);
    assert!(rel_error(&grads.dw, &dw_num) < 1e-6);
    assert!(rel_error(&grads.db, &db_num) < 1e-6);
}

#[test]
fn test_affine_backward_bias_is_batch_sum() {
    let x = randn(&[3, 2], 5);
    let w = randn(&[2, 2], 6);
    let b = Tensor::zeros(&[2]);
    let dout = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);

    let (_, cache) = affine_forward(&x, &w, &b).unwrap();
    let grads = affine_backward(&dout, &cache).unwrap();
    assert_eq!(grads.db, Tensor::new(&[9.0, 12.0], &[2]));
    assert_eq!(grads.dx.shape(), &[3, 2]);
    assert_eq!(grads.dw.shape(), &[2, 2]);
}

#[test]
fn test_affine_shape_errors() {
    let w = Tensor::<f64>::zeros(&[4, 3]);
    let b = Tensor::zeros(&[3]);

    let result = affine_forward(&Tensor::zeros(&[2, 5]), &w, &b);
    assert_err!(
        result,
        CaptionError::ShapeMismatch([2, 4], [2, 5], "affine 的输入列数须等于权重行数")
    );

    let result = affine_forward(&Tensor::zeros(&[2, 4]), &w, &Tensor::zeros(&[4]));
    assert_err!(
        result,
        CaptionError::ShapeMismatch([3], [4], "affine 的偏置长度须等于权重列数")
    );

    let result = affine_forward(&Tensor::zeros(&[2, 1, 4]), &w, &b);
    assert_err!(result, CaptionError::DimensionMismatch { expected: 2, got: 3, .. });

    // 上游梯度形状不对
    let (_, cache) = affine_forward(&Tensor::zeros(&[2, 4]), &w, &b).unwrap();
    let result = affine_backward(&Tensor::zeros(&[2, 4]), &cache);
    assert_err!(result, CaptionError::ShapeMismatch { .. });
}
