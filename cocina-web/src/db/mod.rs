//! SQL access for recipes and their steps

pub mod recipes;
pub mod steps;

pub use recipes::ListFilter;
pub use steps::{add_step, delete_step, get_step, load_steps, update_step};
