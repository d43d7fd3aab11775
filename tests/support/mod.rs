#![allow(dead_code)]

pub mod feeds;
pub mod socket_guard;
