#[macro_use]
extern crate rocket;

use cafe_api::telemetry::setup_tracing;

#[launch]
fn rocket() -> _ {
    setup_tracing();
    cafe_api::rocket()
}
