//! Settings sources and their resolution

pub mod resolve;
pub mod settings;
pub mod sources;

pub use resolve::{ColorEnv, resolve, resolve_with_defaults};
pub use settings::Settings;
pub use sources::{Locations, RawSettings, SettingsSources};
