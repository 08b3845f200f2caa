pub mod constant;
pub mod fixtures;
pub mod setup;

pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{constant::*, TestSetup};
}
