pub mod aggregate;
pub mod commands;
pub mod completion;
pub mod config;
pub mod countdown;
pub mod error;
pub mod filter;
pub mod grid;
pub mod model;
pub mod monitor;
pub mod output;
pub mod query;
pub mod status;
pub mod timefmt;
pub mod view_state;

pub use countdown::{ClockState, CountdownClock, EtaTicker};
pub use error::{Result, WaterfallError};
pub use grid::{render_grid, GridView};
pub use model::Snapshot;
pub use status::{classify, status_label, StatusCategory};
pub use timefmt::Timezone;
pub use view_state::{PageControls, ViewState};
