use atomic_counter::{AtomicCounter, RelaxedCounter};
use indicatif::{ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Reports how far a long running read has progressed.
pub trait ProgressBar {
    /// Advance the bar by an amount, ie. the bytes of a line.
    fn add(&self, amount: usize);
}

/// Contains the indicatif progress bar and an atomic_counter RelaxedCounter.
/// The counter is cheap to update for every line, a background thread moves
/// the bar to the counter every refresh_rate milliseconds.
pub struct Bar {
    counter: Arc<RelaxedCounter>,
    /// An Arc wrapped ProgressBar from indicatif.
    pub pbar: Arc<indicatif::ProgressBar>,
}

impl Bar {
    /// Creates a hidden Bar with a length in bytes, refresh_rate and prefix.
    pub fn new(len: u64, refresh_rate: u64, prefix: String) -> Self {
        let progress_bar = indicatif::ProgressBar::hidden();
        progress_bar.set_length(len);
        progress_bar.set_prefix(prefix);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{prefix}[{bar:40}] [{bytes}/{total_bytes}] {percent:>3}%",
                )
                .progress_chars("=>-"),
        );
        let pb = Arc::new(progress_bar);
        let pb2 = pb.clone();
        let counter = Arc::new(RelaxedCounter::new(0));
        let counter2 = counter.clone();
        thread::spawn(move || {
            while Arc::strong_count(&counter2) > 1 && !pb2.is_finished() {
                pb2.set_position(counter2.get() as u64);
                thread::sleep(Duration::from_millis(refresh_rate));
            }
        });
        Self { counter, pbar: pb }
    }

    /// Creates a Bar that is drawn to stderr.
    pub fn visible(len: u64, refresh_rate: u64, prefix: String) -> Self {
        let bar = Self::new(len, refresh_rate, prefix);
        bar.pbar.set_draw_target(ProgressDrawTarget::stderr());
        bar
    }

    /// Current value of the counter.
    pub fn position(&self) -> usize {
        self.counter.get()
    }
}

impl ProgressBar for Bar {
    fn add(&self, amount: usize) {
        self.counter.add(amount);
    }
}

impl Drop for Bar {
    /// make sure we clear bars when the object is dropped
    fn drop(&mut self) {
        if !self.pbar.is_finished() {
            self.pbar.set_position(self.counter.get() as u64);
            self.pbar.finish_and_clear();
        }
    }
}

/// A bar that reports nothing, for quiet runs and tests.
pub struct HiddenBar {}

impl ProgressBar for HiddenBar {
    fn add(&self, _amount: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_new() {
        let bar = Bar::new(10, 1, String::new());
        assert_eq!(bar.position(), 0);
    }

    #[test]
    fn progress_add() {
        let bar = Bar::new(100, 1, String::new());
        bar.add(42);
        bar.add(8);
        assert_eq!(bar.position(), 50)
    }
}
