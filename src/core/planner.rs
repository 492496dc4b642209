use crate::core::composer::MapComposer;
use crate::core::render::HtmlRenderer;
use crate::domain::model::{PlanOutcome, RouteForm};
use crate::domain::ports::{ConfigProvider, RouteClient, Storage};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_OUTPUT_FILENAME: &str = "route_map.html";

/// Runs one route request end to end: validate, fetch, compose, render, store.
pub struct RoutePlanner<R: RouteClient, S: Storage> {
    client: R,
    storage: S,
    composer: MapComposer,
    renderer: HtmlRenderer,
    output_filename: String,
    unique_filenames: bool,
    sequence: AtomicU64,
}

impl<R: RouteClient, S: Storage> RoutePlanner<R, S> {
    pub fn new(client: R, storage: S) -> Result<Self> {
        Ok(Self {
            client,
            storage,
            composer: MapComposer::default(),
            renderer: HtmlRenderer::new()?,
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            unique_filenames: false,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn from_config<C: ConfigProvider>(client: R, storage: S, config: &C) -> Result<Self> {
        Ok(Self::new(client, storage)?
            .with_composer(MapComposer::new(config.zoom()))
            .with_output_filename(config.output_filename(), config.unique_filenames()))
    }

    pub fn with_composer(mut self, composer: MapComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn with_output_filename(mut self, filename: impl Into<String>, unique: bool) -> Self {
        self.output_filename = filename.into();
        self.unique_filenames = unique;
        self
    }

    pub async fn plan(&self, form: RouteForm) -> Result<PlanOutcome> {
        let request = form.validate()?;
        tracing::info!(
            "Planning route from '{}' to '{}'",
            request.start.label,
            request.end.label
        );

        let path = self
            .client
            .fetch_route(request.start.coordinate, request.end.coordinate)
            .await?;

        let document = self.composer.build(&path, &request.start, &request.end)?;
        let html = self.renderer.render(&document)?;

        let filename = self.next_filename();
        let artifact_path = self.storage.write_file(&filename, html.as_bytes()).await?;

        tracing::info!(
            "Route map saved as {}. Total Distance: {:.2} km",
            artifact_path,
            document.distance_km()
        );

        Ok(PlanOutcome {
            artifact_path,
            distance_km: document.distance_km(),
            document,
        })
    }

    /// The configured name, or `stem-{timestamp}-{seq}.ext` when every request
    /// needs its own file.
    fn next_filename(&self) -> String {
        if !self.unique_filenames {
            return self.output_filename.clone();
        }

        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Local::now().format("%Y%m%dT%H%M%S");
        let path = Path::new(&self.output_filename);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("route_map");
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}-{}-{}.{}", stem, stamp, seq, ext),
            None => format!("{}-{}-{}", stem, stamp, seq),
        }
    }
}
