pub mod builders;
pub mod harness;

// Re-export commonly used test utilities
pub use builders::params;
pub use harness::TestHarness;
