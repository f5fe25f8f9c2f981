pub mod car;
pub mod engine;
pub mod events;
pub mod field;
pub mod motion;
pub mod parse;
pub mod ports;
pub mod report;
pub mod scanner;
pub mod scenario;
pub mod sync;
pub mod types;

pub use car::*;
pub use engine::*;
pub use events::*;
pub use field::*;
pub use motion::*;
pub use parse::*;
pub use ports::*;
pub use report::*;
pub use scanner::*;
pub use scenario::*;
pub use sync::*;
pub use types::*;
