pub mod shortcuts;
pub mod timers;
pub mod trainer;
