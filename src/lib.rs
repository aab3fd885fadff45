pub mod record;
pub mod selection;
pub mod shared;
pub mod shift;
pub mod timeline;
pub mod trip;

pub mod prelude {
    pub use crate::selection::Selection;
    pub use crate::shared::time::Time;
    pub use crate::shift::ShiftPayload;
    pub use crate::timeline::{Marker, Timeline, Window};
    pub use crate::trip::{StopVisit, Trip};
}
