pub mod bench;
pub mod done;
pub mod fail;
pub mod pop;
pub mod push;
pub mod stats;
