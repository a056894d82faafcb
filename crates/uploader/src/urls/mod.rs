mod builder;
mod params;

pub use builder::ProxyUrlBuilder;
pub use params::{Gravity, OutputFormat, Resize, ResizeMode, TransformParams};
