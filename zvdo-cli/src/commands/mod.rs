// zvdo-cli/src/commands/mod.rs
//
// Command implementations invoked by main().

pub mod convert;
