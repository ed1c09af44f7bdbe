pub mod config;
pub mod logo;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod service;
pub mod storage;
pub mod web;
