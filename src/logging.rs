use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Route `log` output to `path`. The terminal belongs to the UI, so nothing
/// is written to stdout or stderr.
pub fn init(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = open_log_file(path)?;
    writeln!(
        file,
        "=== Session started at {} ===",
        Local::now().format(TIMESTAMP_FORMAT)
    )?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}",
                Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.args()
            )
        })
        .try_init()?;
    Ok(())
}
