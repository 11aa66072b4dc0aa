use indicatif::{ProgressBar, ProgressStyle};

/// Receives upload progress after every accepted chunk
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first chunk
    fn on_start(&self, _total_bytes: u64) {}

    /// Called after each accepted chunk with the rounded percentage sent so far
    fn on_progress(&self, percent: u8, bytes_sent: u64);

    /// Called once after the last chunk was accepted
    fn on_finish(&self) {}
}

/// Ignores progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_progress(&self, _percent: u8, _bytes_sent: u64) {}
}

/// Terminal progress bar in percent
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}% {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("█▓▒░"));
        bar.set_message(message.into());
        Self { bar }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn on_start(&self, _total_bytes: u64) {
        self.bar.set_position(0);
    }

    fn on_progress(&self, percent: u8, _bytes_sent: u64) {
        self.bar.set_position(u64::from(percent));
    }

    fn on_finish(&self) {
        self.bar.finish_with_message("uploaded");
    }
}
