mod temporal_softmax;

pub use temporal_softmax::temporal_softmax_loss;
