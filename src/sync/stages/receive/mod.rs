mod stage;

pub use stage::{DownstreamPort, Stage, Worker, decode_frame};
