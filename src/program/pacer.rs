use std::thread;
use std::time::Duration;

/// Decides what a `wait` command does.
pub trait Pacer {
    fn wait(&mut self, duration: Duration);
}

#[derive(Default)]
/// Blocks the calling thread for the requested time.
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
