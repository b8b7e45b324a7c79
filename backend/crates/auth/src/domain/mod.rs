pub mod operation;
pub mod principal;
pub mod role;

pub use operation::Operation;
pub use principal::Principal;
pub use role::{Role, RoleSet};
