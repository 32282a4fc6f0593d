pub mod auth;
pub mod class_types;
pub mod payment;
pub mod teacher;
pub mod user;
pub mod yoga;
