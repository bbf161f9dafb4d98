//! End-to-end tests for the command line interface: a `serve` child process
//! configured through THUMBGEN_* variables, driven by the client subcommands
//! of the same binary.

mod stats_cli;
