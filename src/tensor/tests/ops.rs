use crate::tensor::Tensor;

#[test]
fn test_add_with_bias_broadcast() {
    // [N,H] + [H]
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let b = Tensor::new(&[10., 20., 30.], &[3]);
    let result = &x + &b;
    assert_eq!(result, Tensor::new(&[11., 22., 33., 14., 25., 36.], &[2, 3]));
    // 加法可交换
    assert_eq!(&b + &x, result);
}

#[test]
#[should_panic(expected = "张量形状不兼容")]
fn test_add_incompatible_shapes() {
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let y = Tensor::new(&[1., 2.], &[2]);
    let _ = x + y;
}

#[test]
fn test_sub_and_mul() {
    let a = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    let b = Tensor::new(&[4., 3., 2., 1.], &[2, 2]);
    assert_eq!(&a - &b, Tensor::new(&[-3., -1., 1., 3.], &[2, 2]));
    assert_eq!(&a * &b, Tensor::new(&[4., 6., 6., 4.], &[2, 2]));
    assert_eq!(a.clone() * b.clone() - a, Tensor::new(&[3., 4., 3., 0.], &[2, 2]));
}

#[test]
fn test_mul_by_scalar() {
    let a = Tensor::new(&[2., 4., 6.], &[3]);
    assert_eq!(&a * 0.5, Tensor::new(&[1., 2., 3.], &[3]));
    // 原张量不受影响
    assert_eq!(a, Tensor::new(&[2., 4., 6.], &[3]));
}
