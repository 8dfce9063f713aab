use crate::tensor::Tensor;

#[test]
fn test_compare_shapes() {
    let tensor1 = Tensor::new(&[1., 2., 3., 4.], &[1, 4]);
    let tensor2 = Tensor::new(&[1., 2., 3., 4.], &[1, 4]);
    assert!(tensor1.is_same_shape(&tensor2));
    let tensor3 = Tensor::new(&[1., 2., 3., 4.], &[4]);
    assert!(!tensor1.is_same_shape(&tensor3));
}

#[test]
fn test_reshape_keeps_row_major_order() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let reshaped = tensor.reshape(&[3, 2]);
    assert_eq!(reshaped, Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]));
    // 转置后再重排，按逻辑顺序而非内存顺序
    let reshaped = tensor.transpose().reshape(&[6]);
    assert_eq!(reshaped, Tensor::new(&[1., 4., 2., 5., 3., 6.], &[6]));
}

#[test]
#[should_panic(expected = "张量形状不兼容")]
fn test_reshape_panic_on_incompatible_shape() {
    Tensor::new(&[1., 2., 3., 4.], &[2, 2]).reshape(&[3]);
}

#[test]
fn test_select_and_stack_axis() {
    // [N=2, T=3, H=1]
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3, 1]);
    let step_1 = x.select_axis(1, 1);
    assert_eq!(step_1, Tensor::new(&[2., 5.], &[2, 1]));

    let steps = (0..3).map(|t| x.select_axis(1, t)).collect::<Vec<_>>();
    assert_eq!(Tensor::stack_axis(&steps, 1), x);
}

#[test]
#[should_panic(expected = "张量列表为空")]
fn test_stack_empty() {
    Tensor::<f32>::stack_axis(&[], 0);
}
