pub mod pipeline;
pub mod stages;
