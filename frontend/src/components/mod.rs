pub mod choice;
pub mod heatmap_canvas;
pub mod login_modal;
pub mod nav;
pub mod region;
