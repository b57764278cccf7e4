//! HTTP path constants
//!
//! Paths are flat and camelCase because the consumer protocol predates this
//! implementation.

pub const ADD_USER: &str = "/addUser";
pub const REMOVE_USER: &str = "/removeUser";
pub const GET_TRAFFIC: &str = "/getTraffic";
pub const QUIT: &str = "/quit";
