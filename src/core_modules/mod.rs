pub mod extractor;
pub mod face;
pub mod pixel;
pub mod pixel_buffer;
pub mod projection;
pub mod sampler;
pub mod utils;
