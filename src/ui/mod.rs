pub mod canvas;
pub mod controller;
pub mod dialogs;
pub mod legend;
pub mod surface;
pub mod theme;
pub mod timeline;
pub mod toolbar;
