mod ops;
mod others;
mod shape;
