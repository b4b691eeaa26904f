pub mod chart;
pub mod cost;
pub mod crons;
pub mod sessions;
pub mod status_bar;
