pub mod config;
pub mod crypt;
pub mod error;
pub mod runtime;
pub mod saveload;
pub mod syntax;
pub mod system;
