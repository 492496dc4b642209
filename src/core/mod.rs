pub mod composer;
pub mod input;
pub mod planner;
pub mod render;
pub mod session;

pub use crate::domain::model::{
    Coordinate, MapDocument, NamedPoint, PlanOutcome, RouteForm, RoutePath,
};
pub use crate::domain::ports::{ConfigProvider, RouteClient, Storage};
pub use crate::utils::error::Result;
