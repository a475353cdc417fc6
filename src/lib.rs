pub mod config;
pub mod deferred;
pub mod error;
pub mod metrics;
pub mod mutants;
pub mod operators;
pub mod position;
pub mod result;
pub mod status;
pub mod summary;
pub mod test_location;

pub use deferred::Deferred;
pub use error::{ArtifactError, ConfigError, InvalidArgument, PositionError, SummaryError};
pub use mutants::{Mutant, Mutation};
pub use operators::Mutator;
pub use result::{MutantExecutionResult, ResultParts};
pub use status::DetectionStatus;
pub use test_location::TestLocation;
