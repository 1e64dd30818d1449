pub mod app;
pub mod bins;
pub mod constants;
pub mod error;
pub mod record;
pub mod store;
pub mod ticks;
pub mod ui;
pub mod util;
