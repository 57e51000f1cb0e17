//! Candidate retention for patch matching.

pub mod match_set;
