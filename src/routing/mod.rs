mod catalog;
mod disjoint;

pub use catalog::{CandidateRoutes, PathCatalog, CANDIDATE_PATHS};
pub use disjoint::edge_disjoint_paths;
