pub mod featurize;
pub mod geometry;
