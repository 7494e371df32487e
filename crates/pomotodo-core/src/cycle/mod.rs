mod clock;
mod engine;
mod settings;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{FocusEngine, TICK_PERIOD};
pub use settings::{CycleSettings, CycleSettingsPatch};
pub use state::{CycleState, Mode};
