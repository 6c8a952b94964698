pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{CONFIG_FILE_NAME, load_policy};
pub use model::{ContentPolicy, EbuildPolicy, MessagePolicy, Policy, UprevPolicy, VirtualPvPolicy};
