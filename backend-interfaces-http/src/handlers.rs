pub mod admin_handlers;
pub mod cellar_handlers;
pub mod history_handlers;
pub mod lookup_handlers;
pub mod ops_handlers;
pub mod wine_handlers;

pub use admin_handlers::*;
pub use cellar_handlers::*;
pub use history_handlers::*;
pub use lookup_handlers::*;
pub use ops_handlers::*;
pub use wine_handlers::*;
