pub mod matrix;
pub mod normalizer;
pub mod pipeline;
pub mod predictor;
pub mod recommendations;
pub mod report;
pub mod similarity;

pub use matrix::{IdIndex, RatingMatrix};
pub use normalizer::NormalizedMatrix;
pub use pipeline::Pipeline;
pub use predictor::PredictionMatrix;
pub use recommendations::{recommend, RecommendError};
pub use report::Summary;
pub use similarity::SimilarityMatrix;
