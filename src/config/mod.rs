pub mod schema;
pub mod loader;
pub mod validator;
pub mod resolved;
pub mod settings;

pub use schema::*;
pub use loader::*;
pub use validator::*;
pub use resolved::*;
pub use settings::*;
