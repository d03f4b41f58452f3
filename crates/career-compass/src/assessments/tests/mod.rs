mod common;
mod scoring;
mod transform;
