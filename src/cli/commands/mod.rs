mod admin;
mod forge;
mod initdb;

pub use admin::{cmd_admin, prompt, prompt_confirmed};
pub use forge::{ForgeReport, OWNER_NAME, SAMPLE_ARTICLES, cmd_forge, forge};
pub use initdb::cmd_initdb;
