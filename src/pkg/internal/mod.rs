pub mod adaptors;
pub mod clock;
pub mod postings;
pub mod recorder;
pub mod scheduler;
pub mod store;
pub mod transitions;
