mod aggregate;
mod common;
mod service;
