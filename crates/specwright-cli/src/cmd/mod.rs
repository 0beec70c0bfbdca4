pub mod config;
pub mod init;
pub mod status;
pub mod update;
