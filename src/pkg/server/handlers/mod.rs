pub mod audit;
pub mod postings;
pub mod probes;
