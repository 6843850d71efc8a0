//! Personal profile data and batch loading

mod data;
pub mod loader;

pub use data::{Profile, Gender, decimal_age};
pub use loader::{load_profiles, load_profiles_from_reader, LoadedProfile};
