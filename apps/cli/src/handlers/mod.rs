pub mod configure;
pub mod detect;
pub mod options;
