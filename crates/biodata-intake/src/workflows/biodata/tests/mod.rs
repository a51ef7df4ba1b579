mod admin;
mod common;
mod form;
