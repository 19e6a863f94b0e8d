pub mod config;
pub mod decompress;
pub mod generate;
pub mod logging;
pub mod record;
pub mod reference;
pub mod sampler;
pub mod streets;
pub mod writer;
