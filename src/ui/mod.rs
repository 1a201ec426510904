/// UI layer for the display window: plot widgets and surrounding panels.
pub mod panels;
pub mod plot;
