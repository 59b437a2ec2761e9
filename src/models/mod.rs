mod question;

pub use question::{Choice, Question};
