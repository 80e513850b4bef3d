use anyhow::Context;
use log::LevelFilter;
use std::path::Path;

/// Send log messages at `level` and above to the file at `path`, appending to
/// whatever is already there
pub(crate) fn init(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let config = simplelog::ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    simplelog::WriteLogger::init(level, config, file).context("failed to install logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unopenable_file() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("no-such-dir").join("gamebox.log");
        let e = init(&path, LevelFilter::Info).unwrap_err();
        assert_eq!(e.to_string(), "failed to open log file");
        assert!(!path.exists());
    }
}
