pub mod finance;
pub mod format;
pub mod panels;
pub mod plot;
