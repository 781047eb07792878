pub mod app;
pub mod board;
pub mod chart;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod items;
pub mod models;
pub mod relative_time;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ticker;
pub mod ui;
pub mod urgency;
pub mod validation;
pub mod view;
pub mod window;

pub use app::router;
pub use state::AppState;
pub use storage::load_data;
