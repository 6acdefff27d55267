#[macro_use]
extern crate rocket;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Config, Rocket};
use rocket_db_pools::Database;

use config::app_config::{AppConfig, StoreKind};
use config::mongo_config::CafeDb;
use repository::Stores;
use services::cors_fairing::{all_options, Cors};

/// Builds the service with the store selected by the `store` config key.
pub fn rocket() -> Rocket<Build> {
    rocket_from(Config::figment())
}

/// Builds the service from an explicit figment. A malformed
/// `store` or `database` key fails ignition through `AdHoc::config`.
pub fn rocket_from(figment: Figment) -> Rocket<Build> {
    let rocket = rocket::custom(figment);

    let rocket = match AppConfig::from_figment(rocket.figment()) {
        Ok(config) => with_stores(rocket, &config),
        Err(e) => {
            tracing::error!(error = %e, "invalid application config");
            rocket
        }
    };

    mount(rocket)
}

fn with_stores(rocket: Rocket<Build>, config: &AppConfig) -> Rocket<Build> {
    match config.store {
        StoreKind::Memory => {
            tracing::warn!("using the in-memory store, data is lost on shutdown");
            rocket.manage(Stores::memory())
        }
        StoreKind::Mongo => {
            let database = config.database.clone();
            rocket
                .attach(CafeDb::init())
                .attach(AdHoc::try_on_ignite("Mongo repositories", move |rocket| async move {
                    match CafeDb::fetch(&rocket) {
                        Some(client) => {
                            tracing::info!(database = %database, "connected to mongodb");
                            let stores = Stores::mongo(&client.database(&database));
                            Ok(rocket.manage(stores))
                        }
                        None => {
                            tracing::error!("mongodb pool is not initialized");
                            Err(rocket)
                        }
                    }
                }))
        }
    }
}

/// Builds the service around already constructed stores.
pub fn rocket_with(stores: Stores) -> Rocket<Build> {
    mount(rocket::build().manage(stores))
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(AdHoc::config::<AppConfig>())
        .attach(Cors)
        .mount("/", routes![
            all_options,
            routes::products::get_all_products,
            routes::products::add_product,
            routes::tables::get_all_tables,
            routes::tables::add_table,
            routes::tables::get_table,
            routes::tables::add_to_order,
            routes::tables::replace_orders,
            routes::tables::adjust_order_line,
            routes::tables::begin_payment,
            routes::tables::save_payment,
            routes::reports::orders_report,
            routes::reports::payment_report,
        ])
        .register("/", catchers![
            routes::not_found,
            routes::bad_request,
            routes::unprocessable,
            routes::internal_error,
        ])
}
