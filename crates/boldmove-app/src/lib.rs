// Application layer + CLI presentation for the Bold Move streak tracker

pub mod application;
pub mod presentation;
