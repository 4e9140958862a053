//! CLI configuration and logging setup for the scheduler binary.

use std::path::PathBuf;

use clap::Parser;

use crate::priority::PriorityDiscipline;

#[derive(Parser, Debug)]
#[command(author, version, about = "online scheduler for a pearl-processing worker graph", long_about = None)]
pub struct Cli {
    /// Directory for logs and, if enabled, rendered tick graphs
    #[arg(long, default_value = "out")]
    pub output_dir: PathBuf,

    /// Log level passed to the logging subsystem (overridden by RUST_LOG if set)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Render each tick's world to a Graphviz .dot file under output-dir
    #[arg(long)]
    pub render_ticks: bool,

    /// Pearl priority discipline used by the dispatcher
    #[arg(long, value_enum, default_value = "thinnest")]
    pub priority: PriorityDiscipline,
}

/// Initialize the `env_logger` backend. Mirrors the host's USI adapter:
/// a level filter from `--log-level`, overridable by `RUST_LOG`, formatted
/// with timestamp, level, and target, writing to stderr so stdout stays
/// clean for the NDJSON protocol.
pub fn init_logging(log_level: &str) {
    use std::io::Write;

    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level);
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

/// Create `dir` (and its parents) if it doesn't already exist. Failure here
/// is fatal: the caller cannot write logs or renders without it.
pub fn ensure_output_dir(dir: &std::path::Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}
