pub mod activity;
pub mod budget;
pub mod catalog;
pub mod common;
pub mod goal;
pub mod history;
pub mod note;
pub mod promo;
pub mod renewal;
pub mod spending;
pub mod tag;
