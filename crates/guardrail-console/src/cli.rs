use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "guardrail-console",
    version,
    about = "Operator console for the guardrail moderation service"
)]
pub(crate) struct Args {
    /// Service base path, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    #[arg(long, default_value = "config/console.toml")]
    pub(crate) config: PathBuf,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
}
