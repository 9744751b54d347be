pub mod config;
pub mod constants;
pub mod draw;
pub mod effects;
pub mod error;
pub mod field;
pub mod motion;
pub mod particle;
pub mod quality;
pub mod scheduler;
pub mod surface;

pub use config::*;
pub use draw::*;
pub use effects::*;
pub use error::*;
pub use field::*;
pub use motion::*;
pub use particle::*;
pub use quality::*;
pub use scheduler::*;
pub use surface::*;
