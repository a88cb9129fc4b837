pub mod progress;
pub mod report;
pub mod genetic;
pub mod swarm;
pub mod clustering;

pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, ProgressCallback, ProgressMessage,
    QuietProgressCallback,
};
pub use report::{RunClock, RunInfo};
