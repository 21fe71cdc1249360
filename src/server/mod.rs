mod article;
mod handlers;
mod models;
mod state;
mod translate;

pub use handlers::run_server;
