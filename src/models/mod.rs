pub mod answer;
pub mod notification;
pub mod outcome;
pub mod page;
pub mod question;
pub mod tag;
pub mod user;
pub mod vote;

pub use answer::*;
pub use notification::*;
pub use outcome::*;
pub use page::*;
pub use question::*;
pub use tag::*;
pub use user::*;
pub use vote::*;
