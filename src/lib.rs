// src/lib.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod util;
pub mod index_record;

pub mod snippet;
pub mod scan;
pub mod render;

pub mod commands;
