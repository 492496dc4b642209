pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{osrm::OsrmClient, storage::LocalStorage};
pub use crate::core::{
    composer::MapComposer, planner::RoutePlanner, render::HtmlRenderer, session::RouteSession,
};
pub use domain::model::{Coordinate, MapDocument, NamedPoint, PlanOutcome, RouteForm, RoutePath};
pub use utils::error::{Result, RouteMapError};
