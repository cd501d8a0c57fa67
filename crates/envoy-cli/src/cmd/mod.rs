pub mod profile;
pub mod skill;
pub mod stack;
