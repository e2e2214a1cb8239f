//! Text measurement and line fitting.

mod fitter;

pub use fitter::{FontSpec, TextFitter};
