pub mod biodata;
