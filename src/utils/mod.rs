pub mod matrix;
mod io;

pub use matrix::Matrix2;

pub use io::{Args, enumerate_input_files};
pub use clap::Parser;
