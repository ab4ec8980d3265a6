pub mod channel;
pub mod zone;

pub use channel::{ChannelFrame, UnitFrame, UnitMetadata};
pub use zone::ZoneRecord;
