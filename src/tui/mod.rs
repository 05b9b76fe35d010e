pub mod draw;
pub mod events;
pub mod layout;
pub mod run;
pub mod state;
pub mod views;

pub use draw::*;
pub use events::*;
pub use layout::*;
pub use run::run;
pub use state::*;
pub use views::*;
