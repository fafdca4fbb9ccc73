pub mod batch;
pub mod renderer;
pub mod svg;
