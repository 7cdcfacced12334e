pub mod check;
pub mod init_config;
pub mod run;
pub mod simulate;
