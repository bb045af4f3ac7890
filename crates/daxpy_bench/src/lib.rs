// Interactive harness around the daxpy kernels.

pub mod config;
pub mod console;
pub mod session;
pub mod trial;
