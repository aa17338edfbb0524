pub mod goons;
pub mod settings;
pub mod timestamp;
pub mod trader;

pub use goons::{GoonsLocationRecord, GoonsLocationResponse};
pub use settings::{ActionSettings, DecodedSettings, GoonsSource};
pub use trader::{GameMode, TraderResetsResponse, TraderRestockRecord, TraderSnapshot};
