pub mod config;
pub mod event;
pub mod store;

pub use config::{CanvasConfig, Config, InferenceConfig, UiConfig};
pub use event::{EventId, Position, TimelineEvent};
pub use store::{EventPatch, EventStore, StoreError};
