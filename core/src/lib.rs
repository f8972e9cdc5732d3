pub mod action;
pub mod port;
pub mod profile;

pub mod prelude {
    pub use crate::action::Action;
    pub use crate::port::{NamedAction, Port, PortKey, PortMapping, SLOTS_PER_ROW};
    pub use crate::profile::{
        CpuType, Manifest, Metadata, Preset, Profile, RomProfile, Screen, Size,
    };
}
