// Main library file for the travel marketplace client

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod tokens;
pub mod transport;
pub mod wizard;

// Re-export key types for convenience
pub use api::{ApiClient, ClientStats, StatsSnapshot};
pub use catalog::{CatalogService, DemoCatalog, Listings};
pub use config::ClientConfig;
pub use error::{ApiError, ClientError};
pub use filters::{
    FilterError, FilterPatch, FilterState, HotelFilters, HotelFiltersPatch, Mode, QueryParams,
    SortOrder, TagField, TourFilters, TourFiltersPatch,
};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
pub use transport::{mock::MockTransport, ApiRequest, ApiResponse, HttpTransport, Transport};
pub use wizard::{TourDraft, TourWizard, WizardError, WizardStep};
