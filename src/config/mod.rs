mod compile;
mod loader;
mod model;
mod validation;

pub use compile::compile_query;
pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{CONFIG_VERSION, Config, PredicateSpec, QuerySpec, RuleSpec, Scalar};
pub use validation::validate_config_semantics;
