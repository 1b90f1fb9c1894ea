pub mod chart;
pub mod pickup;
pub mod scroll;
pub mod story;
pub mod submit;
pub mod widget;
