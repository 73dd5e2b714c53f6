pub mod audit;
pub mod postings;
