#![allow(non_snake_case)]

pub mod models;
pub mod store;
pub mod clients;
pub mod service;
pub mod tasks;
pub mod config;
pub mod cli;
pub mod runtime;
