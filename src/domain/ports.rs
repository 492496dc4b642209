use crate::domain::model::{Coordinate, RoutePath};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Writes `data` under `path` and returns the location it was stored at.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn routing_base_url(&self) -> &str;
    fn routing_profile(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn zoom(&self) -> u8;
    fn output_dir(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn unique_filenames(&self) -> bool;
}

/// Source of driving routes between two points.
#[async_trait]
pub trait RouteClient: Send + Sync {
    async fn fetch_route(&self, origin: Coordinate, destination: Coordinate) -> Result<RoutePath>;
}
