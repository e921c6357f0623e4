pub mod birthdays;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod history;
pub mod login;
pub mod projects;
pub mod report;
pub mod stat;
pub mod user;
pub mod vacations;
