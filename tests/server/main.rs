#![allow(dead_code)]

mod helpers;

mod health_api;
mod stats_api;
