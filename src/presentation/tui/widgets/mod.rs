pub mod charts;
pub mod event_panel;
