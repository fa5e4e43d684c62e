pub mod config;
pub mod script;
pub mod source;

pub use config::load_config;
pub use script::{ReplayOutcome, Script, ScriptStep, load_script};
pub use source::FileSource;
