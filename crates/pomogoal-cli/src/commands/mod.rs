pub mod goal;
pub mod stats;
pub mod timer;
