pub mod user;
pub mod video;
mod util;

pub use user::*;
pub use util::*;
pub use video::*;
