pub mod evaluator;

pub use evaluator::{intersect, QueryEvaluator};
