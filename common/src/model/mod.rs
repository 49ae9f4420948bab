pub mod animal;
pub mod calving;
pub mod event;
pub mod field;
pub mod import;
pub mod kind;
pub mod property;
pub mod slaughter;
pub mod vaccination;
