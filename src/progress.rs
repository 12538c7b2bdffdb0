/// Reporting seam for pipeline stages. Stages take a `&dyn Progress` instead
/// of printing, so they stay quiet under `--json` and in tests.
pub trait Progress {
    fn info(&self, message: &str);
}

/// Writes progress lines to stderr, keeping stdout free for data output.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn info(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Discards everything.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn info(&self, _message: &str) {}
}
