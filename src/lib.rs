pub mod addons;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod feed;
pub mod models;
pub mod projection;
pub mod search;
pub mod state;
pub mod table;
pub mod timestamps;
pub mod value_utils;

pub use addons::{build_columns, build_dictionary, AddonDictionary};
pub use error::AppError;
pub use models::{Operator, OperatorAddon, SortOrder, TableSort, TableState, WorkingFilter};
pub use projection::{project, Projection};
pub use state::{AppState, TableAction, ViewStore};
