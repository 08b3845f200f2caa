//! Pure helpers consulted by the entities; nothing here touches the network.

pub mod level;
pub mod trainer_code;
