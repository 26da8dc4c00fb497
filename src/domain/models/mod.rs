mod answer;
mod question;

pub use answer::*;
pub use question::*;
