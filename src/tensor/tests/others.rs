use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_sum() {
    let a = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    assert_eq!(a.sum(), 10.);
}

#[test]
fn test_sum_axis() {
    let a = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(a.sum_axis(0), Tensor::new(&[5., 7., 9.], &[3]));
    assert_eq!(a.sum_axis(1), Tensor::new(&[6., 15.], &[2]));
}

#[test]
fn test_tanh() {
    let a = Tensor::new(&[0., 1., -1.], &[3]);
    let result = a.tanh();
    assert_abs_diff_eq!(result[[0]], 0.);
    assert_abs_diff_eq!(result[[1]], 0.7615941559557649, epsilon = 1e-12);
    assert_abs_diff_eq!(result[[2]], -0.7615941559557649, epsilon = 1e-12);
}

#[test]
fn test_argmax_last() {
    // [[1, 3, 2],
    //  [5, 4, 6]]
    let x = Tensor::new(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0], &[2, 3]);
    assert_eq!(x.argmax_last(), vec![1, 2]);

    // 并列时取最前者
    let x = Tensor::new(&[2.0, 2.0, 1.0], &[1, 3]);
    assert_eq!(x.argmax_last(), vec![0]);

    // 3阶：[N=2, T=1, V=2]
    let x = Tensor::new(&[0.1, 0.9, 0.7, 0.3], &[2, 1, 2]);
    assert_eq!(x.argmax_last(), vec![1, 0]);
}

#[test]
fn test_can_broadcast_with() {
    let a = Tensor::<f32>::zeros(&[2, 3]);
    assert!(a.can_broadcast_with(&Tensor::zeros(&[3])));
    assert!(a.can_broadcast_with(&Tensor::zeros(&[1, 3])));
    assert!(!a.can_broadcast_with(&Tensor::zeros(&[2])));
}
