mod reading;

pub use reading::*;
