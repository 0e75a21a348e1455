// src/lib.rs

use sea_orm::DatabaseConnection;
use services::live_updates::ObserverRegistry;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub observers: ObserverRegistry,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            observers: ObserverRegistry::new(),
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod notify;
    pub mod repair_completed;
    pub mod routes;
}

pub mod services {
    pub mod asset_store;
    pub mod history_recorder;
    pub mod live_updates;
    pub mod report_export;
    pub mod transition;
}

pub mod config;
pub mod handlers;
pub mod models;
pub mod server;
