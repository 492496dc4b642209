use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteMapError {
    #[error("Invalid input for '{field}': {reason}")]
    InputValidation { field: String, reason: String },

    #[error("Routing service unavailable: {message}")]
    RouteUnavailable { status: Option<u16>, message: String },

    #[error("No route found between the given points")]
    NoRouteFound,

    #[error("Malformed routing response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Route path has {points} point(s), at least 2 are required")]
    EmptyPath { points: usize },

    #[error("Request was superseded by a newer request")]
    Superseded,

    #[error("Map rendering failed: {0}")]
    RenderError(#[from] tera::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Upstream,
    Route,
    Config,
    System,
}

impl RouteMapError {
    pub fn input(field: &str, reason: impl Into<String>) -> Self {
        Self::InputValidation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputValidation { .. } => ErrorCategory::Input,
            Self::RouteUnavailable { .. } => ErrorCategory::Network,
            Self::MalformedResponse { .. } => ErrorCategory::Upstream,
            Self::NoRouteFound | Self::EmptyPath { .. } | Self::Superseded => ErrorCategory::Route,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::RenderError(_) | Self::IoError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::System
            }
        }
    }

    /// Message shown to the person who filled in the form.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputValidation { field, reason } => {
                format!("Input error in '{}': {}", field, reason)
            }
            Self::RouteUnavailable { status: Some(code), .. } => format!(
                "Failed to fetch route (HTTP {}). Check your connection or input coordinates.",
                code
            ),
            Self::RouteUnavailable { status: None, .. } => {
                "Failed to fetch route. Check your connection or input coordinates.".to_string()
            }
            Self::NoRouteFound => "No route found.".to_string(),
            Self::MalformedResponse { .. } => {
                "The routing service returned an unexpected response.".to_string()
            }
            Self::EmptyPath { .. } => {
                "The routing service returned a route too short to draw.".to_string()
            }
            Self::Superseded => "Request cancelled by a newer request.".to_string(),
            Self::RenderError(_) => "Failed to render the route map.".to_string(),
            Self::IoError(e) => format!("Failed to write the route map: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::ProcessingError { message } => format!("Processing failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Fill in all fields; latitude must be in [-90, 90] and longitude in [-180, 180]"
            }
            ErrorCategory::Network => "Check your network connection and submit the request again",
            ErrorCategory::Upstream => "Verify that the routing endpoint is an OSRM-compatible service",
            ErrorCategory::Route => "Try endpoints closer to the road network",
            ErrorCategory::Config => "Review the configuration file and command-line flags",
            ErrorCategory::System => "Check that the output directory exists and is writable",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Config => 1,
            ErrorCategory::Network | ErrorCategory::Upstream => 2,
            ErrorCategory::Route => 4,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteMapError>;
