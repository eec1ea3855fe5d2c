mod stage;

pub use stage::{Stage, UpstreamPort, Worker};
