pub mod app_setup;
pub mod cli;
pub mod http;
mod routes;

use figment::Figment;
use rocket::{Build, Rocket};
use crate::app_setup::AppSetupFairing;

/// The server as configured by `figment`. State is set up on ignition.
pub fn build_rocket(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment).attach(AppSetupFairing)
}
