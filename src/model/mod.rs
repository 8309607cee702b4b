use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

pub use boarding_pass::*;
pub use flight::*;
pub use flight_id::*;
pub use status::*;

mod boarding_pass;
mod flight;
mod flight_id;
mod status;
