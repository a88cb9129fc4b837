use std::sync::mpsc::Sender;

/// Observer for iterative engines (generations, epochs, cycles, Lloyd steps)
pub trait ProgressCallback: Send {
    fn on_iteration_start(&mut self, iteration: usize);
    fn on_iteration_complete(&mut self, iteration: usize, best: f64, summary: &str);
}

impl<T: ProgressCallback + ?Sized> ProgressCallback for Box<T> {
    fn on_iteration_start(&mut self, iteration: usize) {
        (**self).on_iteration_start(iteration);
    }

    fn on_iteration_complete(&mut self, iteration: usize, best: f64, summary: &str) {
        (**self).on_iteration_complete(iteration, best, summary);
    }
}

pub struct ConsoleProgressCallback {
    label: &'static str,
    every: usize,
}

impl ConsoleProgressCallback {
    pub fn new(label: &'static str, every: usize) -> Self {
        Self { label, every: every.max(1) }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_iteration_start(&mut self, _iteration: usize) {}

    fn on_iteration_complete(&mut self, iteration: usize, best: f64, summary: &str) {
        if iteration % self.every == 0 {
            if summary.is_empty() {
                println!("@{} {:>5}: best = {:.6}", self.label, iteration, best);
            } else {
                println!("@{} {:>5}: best = {:.6} {}", self.label, iteration, best, summary);
            }
        }
    }
}

/// Swallows all progress, used when the caller only wants the report
pub struct QuietProgressCallback;

impl ProgressCallback for QuietProgressCallback {
    fn on_iteration_start(&mut self, _iteration: usize) {}
    fn on_iteration_complete(&mut self, _iteration: usize, _best: f64, _summary: &str) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    IterationStart(usize),
    IterationComplete { iteration: usize, best: f64, summary: String },
}

/// Forwards progress to another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_iteration_start(&mut self, iteration: usize) {
        let _ = self.sender.send(ProgressMessage::IterationStart(iteration));
    }

    fn on_iteration_complete(&mut self, iteration: usize, best: f64, summary: &str) {
        let _ = self.sender.send(ProgressMessage::IterationComplete {
            iteration,
            best,
            summary: summary.to_string(),
        });
    }
}
